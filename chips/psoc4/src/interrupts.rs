// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Named interrupts for the PSoC 4200.

pub const SCB0: u32 = 9;
pub const SCB1: u32 = 10;
