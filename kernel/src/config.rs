// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Data structure for storing compile-time configuration options.
//!
//! Configuration is a `const` object rather than scattered `#[cfg]`
//! attributes. Every code path stays type-checked by the compiler even when
//! an option is off, and after type-checking the compiler folds the
//! constants so a disabled `if CONFIG.x { .. }` block costs nothing in the
//! resulting binary.
//!
//! Options that change per board (buffer sizes, data width, flow control)
//! are construction parameters of the drivers instead, see
//! `capsules_core::spi_uart::SpiUartConfig` and `psoc4::scb::ScbConfig`.

/// Data structure holding compile-time configuration options.
///
/// To change the configuration, enable the matching Cargo feature of the
/// kernel crate.
pub struct Config {
    /// Whether the bootloader communication shim should trace its polling
    /// state machines to the debug output.
    ///
    /// If enabled, every completed, timed out or rejected bootloader read and
    /// write prints a line with the requested size, the transferred count and
    /// the remaining timeout budget.
    pub trace_bootloader: bool,
}

/// A unique instance of `Config` where compile-time configuration options are
/// defined. This is the only location in the crate where `#[cfg(x)]` is used
/// to configure code based on Cargo features.
pub const CONFIG: Config = Config {
    trace_bootloader: cfg!(feature = "trace_bootloader"),
};
