// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! `Delay` that returns immediately and counts its calls.
//!
//! Hooks stand in for the passage of time: a test installs a closure that
//! changes the mocked hardware whenever the code under test waits.

extern crate std;

use core::cell::{Cell, RefCell};
use std::boxed::Box;

use kernel::hil::time::Delay;

type Hook<'a> = RefCell<Option<Box<dyn FnMut(u32) + 'a>>>;

pub struct MockDelay<'a> {
    ms_calls: Cell<usize>,
    us_calls: Cell<usize>,
    on_ms: Hook<'a>,
    on_us: Hook<'a>,
}

impl<'a> MockDelay<'a> {
    pub fn new() -> MockDelay<'a> {
        MockDelay {
            ms_calls: Cell::new(0),
            us_calls: Cell::new(0),
            on_ms: RefCell::new(None),
            on_us: RefCell::new(None),
        }
    }

    /// Run `hook` on every millisecond delay, with the 0-based call index.
    pub fn on_ms(&self, hook: impl FnMut(u32) + 'a) {
        *self.on_ms.borrow_mut() = Some(Box::new(hook));
    }

    /// Run `hook` on every microsecond delay, with the 0-based call index.
    pub fn on_us(&self, hook: impl FnMut(u32) + 'a) {
        *self.on_us.borrow_mut() = Some(Box::new(hook));
    }

    pub fn ms_calls(&self) -> usize {
        self.ms_calls.get()
    }

    pub fn us_calls(&self) -> usize {
        self.us_calls.get()
    }
}

impl Delay for MockDelay<'_> {
    fn delay_ms(&self, _ms: u32) {
        let call = self.ms_calls.get();
        self.ms_calls.set(call + 1);
        if let Some(hook) = self.on_ms.borrow_mut().as_mut() {
            hook(call as u32);
        }
    }

    fn delay_us(&self, _us: u32) {
        let call = self.us_calls.get();
        self.us_calls.set(call + 1);
        if let Some(hook) = self.on_us.borrow_mut().as_mut() {
            hook(call as u32);
        }
    }
}
