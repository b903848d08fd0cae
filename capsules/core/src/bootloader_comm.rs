// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Blocking bootloader transport over [`SpiUart`].
//!
//! A device bootloader has no scheduler to return to while it waits for its
//! host, so both directions are polling loops bounded by a timeout in units
//! of 10 ms, driven through an injected [`Delay`].
//!
//! A packet from the host is considered complete once the receive count
//! stops changing for one byte period. Reception is then frozen so that the
//! host cannot append to a packet while it is being copied out; the next
//! successful [`write`](BootloaderComm::write) of the response thaws it.
//!
//! Usage
//! -----
//!
//! ```rust,ignore
//! # use capsules_core::bootloader_comm::SpiBootloaderComm;
//! let comm = static_init!(
//!     SpiBootloaderComm<'static, psoc4::scb::Scb, psoc4::delay::SpinDelay<Freq48MHz>>,
//!     SpiBootloaderComm::new(uart, &delay)
//! );
//! comm.start();
//! let len = comm.read(&mut packet, 100)?;
//! ```

use kernel::{debug, debug_verbose};
use kernel::hil::bootloader::{BootloaderComm, CommError};
use kernel::hil::spi_uart::SpiUartFifo;
use kernel::hil::time::Delay;

use crate::spi_uart::SpiUart;

/// Default wait between two samples of the receive count, in microseconds.
///
/// Long enough for at least one element to arrive at the slowest supported
/// bit rate, so an unchanged count means the host has stopped sending.
pub const BYTE_TO_BYTE_US: u32 = 160;

/// Fine polling ticks (1 ms each) per unit of the caller's timeout.
const TICKS_PER_TIMEOUT_UNIT: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ReadState {
    /// Nothing received yet.
    WaitingForStart,
    /// Data is arriving; `size` is the last sampled count.
    WaitingForEnd { size: usize },
    /// The count held still at `size`.
    Complete { size: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WriteState {
    Submitting,
    WaitingForDrain,
    Complete,
}

pub struct SpiBootloaderComm<'a, F: SpiUartFifo, D: Delay> {
    uart: &'a SpiUart<'a, F>,
    delay: &'a D,
    byte_to_byte_us: u32,
}

impl<'a, F: SpiUartFifo, D: Delay> SpiBootloaderComm<'a, F, D> {
    pub fn new(uart: &'a SpiUart<'a, F>, delay: &'a D) -> SpiBootloaderComm<'a, F, D> {
        Self::new_with_byte_delay(uart, delay, BYTE_TO_BYTE_US)
    }

    /// Like [`new`](Self::new), with the quiescence wait matched to a
    /// specific bit rate.
    pub fn new_with_byte_delay(
        uart: &'a SpiUart<'a, F>,
        delay: &'a D,
        byte_to_byte_us: u32,
    ) -> SpiBootloaderComm<'a, F, D> {
        SpiBootloaderComm {
            uart,
            delay,
            byte_to_byte_us,
        }
    }
}

impl<F: SpiUartFifo, D: Delay> BootloaderComm for SpiBootloaderComm<'_, F, D> {
    fn start(&self) {
        self.uart.start();
    }

    fn stop(&self) {
        self.uart.stop();
    }

    fn reset(&self) {
        self.uart.clear_rx_buffer();
        self.uart.clear_tx_buffer();
    }

    fn read(&self, buffer: &mut [u8], timeout: u8) -> Result<u16, CommError> {
        if buffer.is_empty() {
            if kernel::config::CONFIG.trace_bootloader {
                debug!("bootloader read: empty buffer");
            }
            return Err(CommError::BadParam);
        }

        let mut remaining = TICKS_PER_TIMEOUT_UNIT * timeout as u32;
        let mut state = ReadState::WaitingForStart;

        let size = loop {
            state = match state {
                ReadState::WaitingForStart => {
                    let size = self.uart.rx_buffer_size();
                    if size != 0 {
                        ReadState::WaitingForEnd { size }
                    } else if remaining == 0 {
                        if kernel::config::CONFIG.trace_bootloader {
                            debug_verbose!(
                                "bootloader read: timeout after {} ms",
                                timeout as u32 * 10
                            );
                        }
                        return Err(CommError::Timeout);
                    } else {
                        self.delay.delay_ms(1);
                        remaining -= 1;
                        ReadState::WaitingForStart
                    }
                }
                ReadState::WaitingForEnd { size } => {
                    // Not charged to the timeout: the host is mid-packet.
                    self.delay.delay_us(self.byte_to_byte_us);
                    let now = self.uart.rx_buffer_size();
                    if now == size {
                        ReadState::Complete { size }
                    } else {
                        ReadState::WaitingForEnd { size: now }
                    }
                }
                ReadState::Complete { size } => break size,
            };
        };

        self.uart.freeze_rx(true);

        let count = size.min(buffer.len()).min(u16::MAX as usize);
        for byte in buffer[..count].iter_mut() {
            *byte = self.uart.read_rx_data() as u8;
        }

        if kernel::config::CONFIG.trace_bootloader {
            debug!(
                "bootloader read: {} of {} bytes, {} ms left",
                count,
                size,
                remaining
            );
        }
        Ok(count as u16)
    }

    fn write(&self, buffer: &[u8], timeout: u8) -> Result<u16, CommError> {
        if buffer.is_empty() || buffer.len() > u16::MAX as usize {
            if kernel::config::CONFIG.trace_bootloader {
                debug!("bootloader write: bad length {}", buffer.len());
            }
            return Err(CommError::BadParam);
        }

        let mut remaining = TICKS_PER_TIMEOUT_UNIT * timeout as u32;
        let mut state = WriteState::Submitting;

        while state != WriteState::Complete {
            state = match state {
                WriteState::Submitting => {
                    self.uart.put_array(buffer);
                    WriteState::WaitingForDrain
                }
                WriteState::WaitingForDrain => {
                    if self.uart.is_tx_idle() {
                        WriteState::Complete
                    } else if remaining == 0 {
                        if kernel::config::CONFIG.trace_bootloader {
                            debug_verbose!(
                                "bootloader write: timeout, {} bytes pending",
                                self.uart.tx_buffer_size()
                            );
                        }
                        return Err(CommError::Timeout);
                    } else {
                        self.delay.delay_ms(1);
                        remaining -= 1;
                        WriteState::WaitingForDrain
                    }
                }
                WriteState::Complete => WriteState::Complete,
            };
        }

        // The response is out; accept the host's next packet.
        self.uart.clear_rx_buffer();
        self.uart.freeze_rx(false);

        if kernel::config::CONFIG.trace_bootloader {
            debug!(
                "bootloader write: {} bytes, {} ms left",
                buffer.len(),
                remaining
            );
        }
        Ok(buffer.len() as u16)
    }
}
