// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Peripheral implementations for the Cypress PSoC 4 family.

#![no_std]

pub mod delay;
pub mod interrupts;
pub mod nvic;
pub mod scb;
