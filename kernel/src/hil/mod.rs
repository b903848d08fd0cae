// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Public traits for interfaces between the SCB transport capsules and the
//! chip and board code below them.

pub mod bootloader;
pub mod spi_uart;
pub mod time;
