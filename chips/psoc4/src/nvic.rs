// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Cortex-M0 NVIC, reduced to per-line control.
//!
//! The M0 supports at most 32 external interrupts, so each NVIC register is
//! a single word and interrupt `n` is bit `n`.

use kernel::utilities::registers::interfaces::Writeable;
use kernel::utilities::registers::{register_structs, ReadWrite};
use kernel::utilities::StaticRef;

register_structs! {
    pub NvicRegisters {
        (0x000 => _reserved0),
        /// Interrupt Set-Enable Register
        (0x100 => iser: ReadWrite<u32>),
        (0x104 => _reserved1),
        /// Interrupt Clear-Enable Register
        (0x180 => icer: ReadWrite<u32>),
        (0x184 => _reserved2),
        /// Interrupt Clear-Pending Register
        (0x280 => icpr: ReadWrite<u32>),
        (0x284 => @END),
    }
}

pub const NVIC_BASE: StaticRef<NvicRegisters> =
    unsafe { StaticRef::new(0xe000e000 as *const NvicRegisters) };

/// A single NVIC interrupt line.
///
/// Hand these out to low-level drivers to let them control their own
/// interrupt but not others.
pub struct Nvic {
    registers: StaticRef<NvicRegisters>,
    line: u32,
}

impl Nvic {
    /// Marked unsafe because only chip/platform configuration code should be
    /// able to create these.
    pub const unsafe fn new(registers: StaticRef<NvicRegisters>, line: u32) -> Nvic {
        Nvic { registers, line }
    }

    fn bit(&self) -> u32 {
        1 << (self.line & 31)
    }

    pub fn enable(&self) {
        self.registers.iser.set(self.bit());
    }

    pub fn disable(&self) {
        self.registers.icer.set(self.bit());
    }

    pub fn clear_pending(&self) {
        self.registers.icpr.set(self.bit());
    }
}
