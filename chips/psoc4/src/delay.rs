// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Calibrated busy-wait delays.
//!
//! Used by code that polls with interrupts possibly masked and no timer
//! allocated to it, such as the bootloader transport. The delay is at least
//! the requested time; interrupts taken while spinning only extend it.

use core::marker::PhantomData;

use kernel::hil::time::{Delay, Frequency};

/// CPU cycles one iteration of the spin loop takes on a Cortex-M0
/// (compare, branch, increment), rounded down.
const CYCLES_PER_ITERATION: u32 = 4;

pub struct SpinDelay<F: Frequency> {
    _clock: PhantomData<F>,
}

impl<F: Frequency> SpinDelay<F> {
    pub const fn new() -> SpinDelay<F> {
        SpinDelay {
            _clock: PhantomData,
        }
    }

    fn iterations(us: u32) -> u32 {
        let per_us = (F::frequency() / 1_000_000).max(1);
        (us.saturating_mul(per_us) / CYCLES_PER_ITERATION).max(1)
    }

    fn spin(iterations: u32) {
        for i in 0..iterations {
            core::hint::black_box(i);
        }
    }
}

impl<F: Frequency> Default for SpinDelay<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Frequency> Delay for SpinDelay<F> {
    fn delay_ms(&self, ms: u32) {
        for _ in 0..ms {
            Self::spin(Self::iterations(1000));
        }
    }

    fn delay_us(&self, us: u32) {
        if us != 0 {
            Self::spin(Self::iterations(us));
        }
    }
}
