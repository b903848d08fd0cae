// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Hardware agnostic interfaces for time.

/// Trait to represent clock frequency in Hz
///
/// Used as a type parameter so drivers can portably convert between clock
/// cycles and real-time values.
pub trait Frequency {
    /// Returns frequency in Hz.
    fn frequency() -> u32;
}

/// 48MHz `Frequency`
#[derive(Debug)]
pub struct Freq48MHz;
impl Frequency for Freq48MHz {
    fn frequency() -> u32 {
        48_000_000
    }
}

/// 24MHz `Frequency`
#[derive(Debug)]
pub struct Freq24MHz;
impl Frequency for Freq24MHz {
    fn frequency() -> u32 {
        24_000_000
    }
}

/// 1MHz `Frequency`
#[derive(Debug)]
pub struct Freq1MHz;
impl Frequency for Freq1MHz {
    fn frequency() -> u32 {
        1_000_000
    }
}

/// Blocking delays.
///
/// Used by polling loops that have no scheduler to yield to, such as a
/// bootloader waiting for its host. Implementations busy-wait for at least
/// the requested time. Tests substitute an implementation that advances a
/// simulated clock instead.
pub trait Delay {
    /// Block for `ms` milliseconds.
    fn delay_ms(&self, ms: u32);

    /// Block for `us` microseconds.
    fn delay_us(&self, us: u32);
}
