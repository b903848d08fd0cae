// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Hardware-independent drivers for the SCB serial transport.
//!
//! - [`spi_uart`]: ring buffer transport between software buffers and the
//!   hardware FIFOs, including the interrupt service routine.
//! - [`bootloader_comm`]: blocking, timeout-bounded packet transport for a
//!   device bootloader, built on [`spi_uart`].

#![forbid(unsafe_code)]
#![no_std]

pub mod bootloader_comm;
pub mod spi_uart;

#[cfg(test)]
mod test;
