// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Core types for the SCB serial transport stack.
//!
//! The kernel crate holds the pieces that chips and capsules share: the
//! standard error type, the compile-time configuration object, the `debug!`
//! logging macros, the Hardware Interface Layer (HIL) traits that separate
//! the register-level SCB driver from the hardware-independent transports,
//! and the single-producer/single-consumer ring buffer used between the
//! interrupt service routine and foreground code.
//!
//! Most `unsafe` code is in this crate.

#![no_std]

pub mod collections;
pub mod config;
#[macro_use]
pub mod debug;
pub mod errorcode;
pub mod hil;
pub mod utilities;

pub use crate::errorcode::ErrorCode;
