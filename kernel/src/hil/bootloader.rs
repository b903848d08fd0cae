// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Byte transport used by a device bootloader to talk to its host.
//!
//! The bootloader protocol layer (packet framing, checksums, commands) sits
//! above this interface and only sees blocking, timeout-bounded reads and
//! writes of whole packets. Timeouts are expressed in units of 10 ms.

use crate::ErrorCode;

/// Failures of a bootloader transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommError {
    /// The buffer was empty. Nothing was polled and the hardware was not
    /// touched.
    BadParam,
    /// The expected condition was not observed within the timeout.
    Timeout,
}

impl From<CommError> for ErrorCode {
    fn from(err: CommError) -> ErrorCode {
        match err {
            CommError::BadParam => ErrorCode::INVAL,
            CommError::Timeout => ErrorCode::BUSY,
        }
    }
}

pub trait BootloaderComm {
    /// Start the underlying serial block.
    fn start(&self);

    /// Stop the underlying serial block.
    fn stop(&self);

    /// Drop everything buffered in both directions.
    fn reset(&self);

    /// Wait up to `timeout` x 10 ms for a packet from the host and copy it
    /// into `buffer`.
    ///
    /// Returns the number of bytes copied, at most `buffer.len()`.
    fn read(&self, buffer: &mut [u8], timeout: u8) -> Result<u16, CommError>;

    /// Send `buffer` to the host and wait up to `timeout` x 10 ms for the
    /// transmission to finish.
    ///
    /// Returns the number of bytes written.
    fn write(&self, buffer: &[u8], timeout: u8) -> Result<u16, CommError>;
}
