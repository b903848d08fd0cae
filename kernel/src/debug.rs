// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Support for debugging output.
//!
//! Provides the `debug!` and `debug_verbose!` macros. Output goes to a sink
//! that the board installs once with [`set_debug_writer`], usually a
//! synchronous UART writer. Until a sink is installed, debug output is
//! dropped.
//!
//! ```rust,ignore
//! debug!("rx overflow, {} elements buffered", count);
//! debug_verbose!("bootloader read timed out");
//! ```
//!
//! Debug output is synchronous. Do not call the macros from an interrupt
//! service routine.

use core::fmt::{Arguments, Write};
use core::ptr::addr_of_mut;

/// A synchronous byte sink for debug output.
pub trait IoWrite {
    /// Write `buf` and return the number of bytes written.
    fn write(&mut self, buf: &[u8]) -> usize;
}

struct IoWriteAdapter<'a> {
    writer: &'a mut dyn IoWrite,
}

impl Write for IoWriteAdapter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.writer.write(s.as_bytes());
        Ok(())
    }
}

static mut DEBUG_WRITER: Option<&'static mut dyn IoWrite> = None;

/// Install the sink used by the `debug!` macros.
///
/// # Safety
///
/// Must be called during board setup, before interrupts are enabled and
/// before any other code can emit debug output.
pub unsafe fn set_debug_writer(writer: &'static mut dyn IoWrite) {
    *addr_of_mut!(DEBUG_WRITER) = Some(writer);
}

/// Format one debug line into `writer`, optionally prefixed with the source
/// location that emitted it.
pub fn write_debug_line(
    writer: &mut dyn IoWrite,
    args: Arguments,
    file_line: Option<&(&'static str, u32)>,
) {
    let mut adapter = IoWriteAdapter { writer };
    if let Some((file, line)) = file_line {
        let _ = adapter.write_fmt(format_args!("SCB_DEBUG: {}:{}: ", file, line));
    }
    let _ = adapter.write_fmt(args);
    let _ = adapter.write_str("\r\n");
}

fn with_writer<F: FnOnce(&mut dyn IoWrite)>(f: F) {
    // SAFETY: the writer is installed once before interrupts are enabled and
    // debug output is only produced from the foreground thread.
    let writer = unsafe { &mut *addr_of_mut!(DEBUG_WRITER) };
    if let Some(writer) = writer {
        f(&mut **writer);
    }
}

pub fn debug_println(args: Arguments) {
    with_writer(|writer| write_debug_line(writer, args, None));
}

pub fn debug_verbose_println(args: Arguments, file_line: &(&'static str, u32)) {
    with_writer(|writer| write_debug_line(writer, args, Some(file_line)));
}

/// In-kernel `println()` debugging.
#[macro_export]
macro_rules! debug {
    () => ({
        // Allow an empty debug!() to print the location when hit
        $crate::debug!("")
    });
    ($msg:expr $(,)?) => ({
        $crate::debug::debug_println(format_args!($msg));
    });
    ($fmt:expr, $($arg:tt)+) => ({
        $crate::debug::debug_println(format_args!($fmt, $($arg)+));
    });
}

/// In-kernel `println()` debugging with the source location.
#[macro_export]
macro_rules! debug_verbose {
    () => ({
        $crate::debug_verbose!("")
    });
    ($msg:expr $(,)?) => ({
        $crate::debug::debug_verbose_println(format_args!($msg), {
            static _FILE_LINE: (&'static str, u32) = (file!(), line!());
            &_FILE_LINE
        });
    });
    ($fmt:expr, $($arg:tt)+) => ({
        $crate::debug::debug_verbose_println(format_args!($fmt, $($arg)+), {
            static _FILE_LINE: (&'static str, u32) = (file!(), line!());
            &_FILE_LINE
        });
    });
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::String;
    use std::vec::Vec;

    struct Recorder {
        bytes: Vec<u8>,
    }

    impl IoWrite for Recorder {
        fn write(&mut self, buf: &[u8]) -> usize {
            self.bytes.extend_from_slice(buf);
            buf.len()
        }
    }

    #[test]
    fn line_without_location() {
        let mut rec = Recorder { bytes: Vec::new() };
        write_debug_line(&mut rec, format_args!("rx size {}", 5), None);
        assert_eq!(String::from_utf8(rec.bytes).unwrap(), "rx size 5\r\n");
    }

    #[test]
    fn line_with_location() {
        let mut rec = Recorder { bytes: Vec::new() };
        let loc = ("capsules/core/src/bootloader_comm.rs", 42);
        write_debug_line(&mut rec, format_args!("timeout"), Some(&loc));
        assert_eq!(
            String::from_utf8(rec.bytes).unwrap(),
            "SCB_DEBUG: capsules/core/src/bootloader_comm.rs:42: timeout\r\n"
        );
    }

    #[test]
    fn no_writer_installed_is_silent() {
        // Nothing is installed in unit tests; this must not panic.
        debug!("dropped {}", 1);
        debug_verbose!("dropped");
    }
}
