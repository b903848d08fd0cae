// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Ring buffer transport for a serial communication block in SPI or UART
//! mode.
//!
//! Decouples the timing of the hardware FIFOs from the timing of the code
//! that produces and consumes data. Each direction is either
//! [`Buffering::Direct`], where every operation goes straight to the
//! hardware FIFO, or [`Buffering::Buffered`], where a software ring buffer
//! extends the FIFO and the interrupt service routine
//! ([`SpiUart::handle_interrupt`]) moves elements between the two.
//!
//! Interrupt sources implement backpressure:
//!
//! - "TX not full" is enabled while the TX ring buffer has elements and
//!   disabled by the interrupt service routine once it runs dry.
//! - "RX not empty" drives reception into the RX ring buffer. With RX flow
//!   control the interrupt service routine disables it when the ring buffer
//!   is full, leaving elements in the FIFO (and the hardware deasserting
//!   RTS), and [`SpiUart::read_rx_data`] enables it again once room is made.
//!   Without flow control, elements arriving to a full ring buffer are
//!   dropped and the overflow flag is set.
//!
//! Usage
//! -----
//!
//! ```rust,ignore
//! # use capsules_core::spi_uart::{Buffering, SpiUart, SpiUartConfig};
//! # use kernel::collections::ring_buffer::DataWidth;
//! let uart = static_init!(
//!     SpiUart<'static, psoc4::scb::Scb>,
//!     SpiUart::new(
//!         &peripherals.scb0,
//!         Buffering::buffered(rx_storage, DataWidth::Byte)?,
//!         Buffering::Direct,
//!         SpiUartConfig::default(),
//!     )
//! );
//! uart.start();
//! ```

use kernel::collections::ring_buffer::{DataWidth, SpscRingBuffer};
use kernel::hil::spi_uart::{InterruptSource, SpiUartFifo};
use kernel::ErrorCode;

/// How one direction of the transport buffers its data.
pub enum Buffering<'a> {
    /// No software buffer; operations use the hardware FIFO only.
    Direct,
    /// A software ring buffer in front of the hardware FIFO.
    Buffered(SpscRingBuffer<'a>),
}

impl<'a> Buffering<'a> {
    /// Put a ring buffer over `storage` in front of the FIFO.
    ///
    /// One slot is always kept free, so the storage must hold at least two
    /// elements of `width`; smaller storage fails with `SIZE`.
    pub fn buffered(
        storage: &'a mut [u8],
        width: DataWidth,
    ) -> Result<Buffering<'a>, ErrorCode> {
        let ring = SpscRingBuffer::new(storage, width);
        if ring.capacity() < 2 {
            return Err(ErrorCode::SIZE);
        }
        Ok(Buffering::Buffered(ring))
    }

    pub fn is_buffered(&self) -> bool {
        matches!(self, Buffering::Buffered(_))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SpiUartConfig {
    /// Leave received elements in the RX FIFO when the RX ring buffer is
    /// full instead of dropping them.
    pub rx_flow_control: bool,
}

pub struct SpiUart<'a, F: SpiUartFifo> {
    hw: &'a F,
    rx: Buffering<'a>,
    tx: Buffering<'a>,
    config: SpiUartConfig,
}

impl<'a, F: SpiUartFifo> SpiUart<'a, F> {
    pub fn new(
        hw: &'a F,
        rx: Buffering<'a>,
        tx: Buffering<'a>,
        config: SpiUartConfig,
    ) -> SpiUart<'a, F> {
        SpiUart { hw, rx, tx, config }
    }

    /// Reset both directions and enable the block.
    pub fn start(&self) {
        self.clear_rx_buffer();
        self.clear_tx_buffer();
        if self.rx.is_buffered() {
            self.hw.enable_interrupt(InterruptSource::RxNotEmpty);
        }
        self.hw.enable();
        self.hw.enable_irq();
    }

    /// Disable the block and its TX interrupt sources.
    pub fn stop(&self) {
        self.hw.disable_irq();
        self.hw.disable();
        self.hw.set_tx_interrupt_mask(0);
    }

    /// Take the next received element.
    ///
    /// With an RX ring buffer that holds data, the element comes from the
    /// ring buffer. Otherwise the RX FIFO is read directly; if it is empty
    /// too the value is undefined, so callers check
    /// [`rx_buffer_size`](Self::rx_buffer_size) first.
    pub fn read_rx_data(&self) -> u32 {
        match &self.rx {
            Buffering::Buffered(ring) => match ring.pop() {
                Some(data) => {
                    if self.config.rx_flow_control
                        && !self.hw.is_interrupt_enabled(InterruptSource::RxNotEmpty)
                    {
                        // Room was made, resume moving data out of the FIFO.
                        self.hw.enable_interrupt(InterruptSource::RxNotEmpty);
                    }
                    data
                }
                None => self.hw.rx_fifo_read(),
            },
            Buffering::Direct => self.hw.rx_fifo_read(),
        }
    }

    /// Number of received elements waiting.
    ///
    /// With an RX ring buffer this counts the ring buffer only, not the
    /// elements still in the hardware FIFO.
    pub fn rx_buffer_size(&self) -> usize {
        match &self.rx {
            Buffering::Buffered(ring) => ring.len(),
            Buffering::Direct => self.hw.rx_fifo_entries(),
        }
    }

    /// Drop all received data, in software and in the FIFO.
    pub fn clear_rx_buffer(&self) {
        match &self.rx {
            Buffering::Buffered(ring) => {
                self.hw.disable_irq();

                ring.reset();
                self.hw.clear_rx_fifo();
                self.hw.clear_rx_interrupts();

                if self.config.rx_flow_control {
                    self.hw.enable_interrupt(InterruptSource::RxNotEmpty);
                }

                self.hw.enable_irq();
            }
            Buffering::Direct => self.hw.clear_rx_fifo(),
        }
    }

    /// Whether received data was lost since the last clear.
    pub fn rx_overflowed(&self) -> bool {
        match &self.rx {
            Buffering::Buffered(ring) => ring.overflowed(),
            Buffering::Direct => self.hw.is_interrupt_pending(InterruptSource::RxOverflow),
        }
    }

    /// Stop or resume accepting received data into the RX FIFO.
    pub fn freeze_rx(&self, frozen: bool) {
        self.hw.set_rx_fifo_frozen(frozen);
    }

    /// Queue one element for transmission, blocking until there is room.
    ///
    /// When nothing is queued in software and the TX FIFO has room, the
    /// element goes straight into the FIFO. Otherwise it is appended to the
    /// TX ring buffer behind the backlog. This busy-waits for as long as the
    /// ring buffer is full, which relies on the interrupt service routine
    /// draining it.
    pub fn write_tx_data(&self, data: u32) {
        match &self.tx {
            Buffering::Buffered(ring) => {
                if ring.is_empty() && !self.hw.tx_fifo_full() {
                    self.hw.tx_fifo_write(data);
                } else {
                    while ring.is_full() {
                        core::hint::spin_loop();
                    }

                    // Stale from the end of the previous transfer.
                    self.hw.clear_interrupt(InterruptSource::TxNotFull);

                    let queued = ring.push(data);
                    debug_assert!(queued);

                    if !self.hw.is_interrupt_enabled(InterruptSource::TxNotFull) {
                        self.hw.enable_interrupt(InterruptSource::TxNotFull);
                    }
                }
            }
            Buffering::Direct => {
                while self.hw.tx_fifo_full() {
                    core::hint::spin_loop();
                }
                self.hw.tx_fifo_write(data);
            }
        }
    }

    /// Queue every byte of `buffer` with [`write_tx_data`](Self::write_tx_data).
    pub fn put_array(&self, buffer: &[u8]) {
        for byte in buffer {
            self.write_tx_data(*byte as u32);
        }
    }

    /// Number of elements waiting to be transmitted.
    ///
    /// With a TX ring buffer this counts the ring buffer only; it stays zero
    /// until the TX FIFO fills up.
    pub fn tx_buffer_size(&self) -> usize {
        match &self.tx {
            Buffering::Buffered(ring) => ring.len(),
            Buffering::Direct => self.hw.tx_fifo_entries(),
        }
    }

    /// Drop all data waiting for transmission.
    pub fn clear_tx_buffer(&self) {
        match &self.tx {
            Buffering::Buffered(ring) => {
                self.hw.disable_irq();

                ring.reset();
                self.hw.disable_interrupt(InterruptSource::TxNotFull);
                self.hw.clear_tx_fifo();
                self.hw.clear_tx_interrupts();

                self.hw.enable_irq();
            }
            Buffering::Direct => self.hw.clear_tx_fifo(),
        }
    }

    /// Whether everything queued has left the block: nothing in the
    /// transmit buffer, the bus is idle and the shift register is empty.
    pub fn is_tx_idle(&self) -> bool {
        self.tx_buffer_size() == 0
            && !self.hw.is_bus_busy()
            && !self.hw.tx_shift_register_valid()
    }

    /// Disable every RX interrupt source, returning the previously enabled
    /// set for [`restore_rx_interrupts`](Self::restore_rx_interrupts).
    pub fn disable_rx_interrupts(&self) -> u32 {
        let sources = self.hw.rx_interrupt_mask();
        self.hw.set_rx_interrupt_mask(0);
        sources
    }

    pub fn restore_rx_interrupts(&self, sources: u32) {
        self.hw.set_rx_interrupt_mask(sources);
    }

    /// Disable every TX interrupt source, returning the previously enabled
    /// set for [`restore_tx_interrupts`](Self::restore_tx_interrupts).
    pub fn disable_tx_interrupts(&self) -> u32 {
        let sources = self.hw.tx_interrupt_mask();
        self.hw.set_tx_interrupt_mask(0);
        sources
    }

    pub fn restore_tx_interrupts(&self, sources: u32) {
        self.hw.set_tx_interrupt_mask(sources);
    }

    /// Interrupt service routine.
    ///
    /// Producer of the RX ring buffer and consumer of the TX ring buffer.
    /// Must be called from the block's interrupt handler (or, on platforms
    /// without one, from the context simulating it) and never concurrently
    /// with itself.
    pub fn handle_interrupt(&self) {
        if let Buffering::Buffered(ring) = &self.rx {
            if self.hw.is_interrupt_enabled(InterruptSource::RxNotEmpty)
                && self.hw.is_interrupt_pending(InterruptSource::RxNotEmpty)
            {
                while self.hw.rx_fifo_entries() != 0 {
                    if self.config.rx_flow_control && ring.is_full() {
                        // Leave the rest in the FIFO until the consumer
                        // makes room.
                        self.hw.disable_interrupt(InterruptSource::RxNotEmpty);
                        break;
                    }

                    let data = self.hw.rx_fifo_read();
                    if !ring.push(data) {
                        ring.set_overflow();
                    }
                }

                self.hw.clear_interrupt(InterruptSource::RxNotEmpty);
            }
        }

        if let Buffering::Buffered(ring) = &self.tx {
            if self.hw.is_interrupt_enabled(InterruptSource::TxNotFull)
                && self.hw.is_interrupt_pending(InterruptSource::TxNotFull)
            {
                while !self.hw.tx_fifo_full() {
                    match ring.pop() {
                        Some(data) => self.hw.tx_fifo_write(data),
                        None => {
                            self.hw.disable_interrupt(InterruptSource::TxNotFull);
                            break;
                        }
                    }
                }

                self.hw.clear_interrupt(InterruptSource::TxNotFull);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::test::mock_fifo::MockFifo;
    use std::vec;
    use std::vec::Vec;

    fn drain_tx(hw: &MockFifo, uart: &SpiUart<MockFifo>) {
        for _ in 0..64 {
            hw.shift_out_all();
            uart.handle_interrupt();
        }
    }

    #[test]
    fn write_goes_straight_to_fifo_when_idle() {
        let hw = MockFifo::new(8);
        let mut tx_storage = [0u8; 8];
        let uart = SpiUart::new(
            &hw,
            Buffering::Direct,
            Buffering::buffered(&mut tx_storage, DataWidth::Byte).unwrap(),
            SpiUartConfig::default(),
        );

        uart.write_tx_data(0x41);

        assert_eq!(hw.tx_fifo_contents(), vec![0x41]);
        assert_eq!(uart.tx_buffer_size(), 0);
        assert!(!hw.is_interrupt_enabled(InterruptSource::TxNotFull));
        assert_eq!(hw.tx_not_full_clears(), 0);
    }

    #[test]
    fn write_queues_behind_backlog() {
        let hw = MockFifo::new(2);
        let mut tx_storage = [0u8; 8];
        let uart = SpiUart::new(
            &hw,
            Buffering::Direct,
            Buffering::buffered(&mut tx_storage, DataWidth::Byte).unwrap(),
            SpiUartConfig::default(),
        );

        uart.put_array(&[1, 2, 3]);
        assert_eq!(hw.tx_fifo_contents(), vec![1, 2]);
        assert_eq!(uart.tx_buffer_size(), 1);
        assert!(hw.is_interrupt_enabled(InterruptSource::TxNotFull));
        assert_eq!(hw.tx_not_full_clears(), 1);

        // The FIFO has room again but the backlog must go first.
        assert_eq!(hw.shift_out_one(), Some(1));
        uart.write_tx_data(4);
        assert_eq!(hw.tx_fifo_contents(), vec![2]);
        assert_eq!(uart.tx_buffer_size(), 2);

        drain_tx(&hw, &uart);
        assert_eq!(hw.sent(), vec![1, 2, 3, 4]);
        assert_eq!(uart.tx_buffer_size(), 0);
        assert!(!hw.is_interrupt_enabled(InterruptSource::TxNotFull));
    }

    #[test]
    fn tx_preserves_order_up_to_capacity() {
        const CAPACITY: usize = 8;
        let hw = MockFifo::new(1);
        let mut tx_storage = [0u8; CAPACITY];
        let uart = SpiUart::new(
            &hw,
            Buffering::Direct,
            Buffering::buffered(&mut tx_storage, DataWidth::Byte).unwrap(),
            SpiUartConfig::default(),
        );

        for round in 0..4u8 {
            // One element fits in the FIFO, capacity - 1 in the ring buffer.
            let data: Vec<u8> = (0..CAPACITY as u8).map(|b| b + round * 16).collect();
            uart.put_array(&data);
            assert_eq!(uart.tx_buffer_size(), CAPACITY - 1);

            drain_tx(&hw, &uart);
            let sent: Vec<u8> = hw.take_sent().into_iter().map(|w| w as u8).collect();
            assert_eq!(sent, data);
        }
    }

    #[test]
    fn tx_word_width() {
        let hw = MockFifo::new(1);
        let mut tx_storage = [0u8; 8];
        let uart = SpiUart::new(
            &hw,
            Buffering::Direct,
            Buffering::buffered(&mut tx_storage, DataWidth::Word).unwrap(),
            SpiUartConfig::default(),
        );

        uart.write_tx_data(0x101);
        uart.write_tx_data(0x1FF);
        uart.write_tx_data(0x2AB);
        assert_eq!(uart.tx_buffer_size(), 2);

        drain_tx(&hw, &uart);
        assert_eq!(hw.sent(), vec![0x101, 0x1FF, 0x2AB]);
    }

    #[test]
    fn rx_preserves_arrival_order() {
        let hw = MockFifo::new(4);
        let mut rx_storage = [0u8; 8];
        let uart = SpiUart::new(
            &hw,
            Buffering::buffered(&mut rx_storage, DataWidth::Byte).unwrap(),
            Buffering::Direct,
            SpiUartConfig::default(),
        );
        uart.start();

        let mut received = Vec::new();
        for chunk in [&[1u8, 2, 3][..], &[4, 5, 6, 7], &[8, 9]] {
            assert_eq!(hw.host_send(chunk), chunk.len());
            uart.handle_interrupt();
            assert_eq!(hw.rx_fifo_entries(), 0);
            while uart.rx_buffer_size() > 0 {
                received.push(uart.read_rx_data() as u8);
            }
        }

        assert_eq!(received, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert!(!uart.rx_overflowed());
    }

    #[test]
    fn rx_overflow_drops_and_flags() {
        let hw = MockFifo::new(8);
        let mut rx_storage = [0u8; 4];
        let uart = SpiUart::new(
            &hw,
            Buffering::buffered(&mut rx_storage, DataWidth::Byte).unwrap(),
            Buffering::Direct,
            SpiUartConfig::default(),
        );
        uart.start();

        assert_eq!(hw.host_send(&[1, 2, 3, 4, 5, 6]), 6);
        uart.handle_interrupt();

        // Capacity 4 keeps one slot free; the rest is drained and lost.
        assert_eq!(uart.rx_buffer_size(), 3);
        assert_eq!(hw.rx_fifo_entries(), 0);
        assert!(uart.rx_overflowed());
        assert!(hw.is_interrupt_enabled(InterruptSource::RxNotEmpty));

        assert_eq!(uart.read_rx_data(), 1);
        assert_eq!(uart.read_rx_data(), 2);
        assert_eq!(uart.read_rx_data(), 3);

        uart.clear_rx_buffer();
        assert!(!uart.rx_overflowed());
    }

    #[test]
    fn rx_flow_control_pauses_and_resumes() {
        let hw = MockFifo::new(8);
        let mut rx_storage = [0u8; 4];
        let uart = SpiUart::new(
            &hw,
            Buffering::buffered(&mut rx_storage, DataWidth::Byte).unwrap(),
            Buffering::Direct,
            SpiUartConfig {
                rx_flow_control: true,
            },
        );
        uart.start();

        assert_eq!(hw.host_send(&[1, 2, 3, 4, 5]), 5);
        uart.handle_interrupt();

        assert_eq!(uart.rx_buffer_size(), 3);
        assert_eq!(hw.rx_fifo_entries(), 2);
        assert!(!uart.rx_overflowed());
        assert!(!hw.is_interrupt_enabled(InterruptSource::RxNotEmpty));

        // Interrupt is masked: nothing moves.
        uart.handle_interrupt();
        assert_eq!(hw.rx_fifo_entries(), 2);

        assert_eq!(uart.read_rx_data(), 1);
        assert!(hw.is_interrupt_enabled(InterruptSource::RxNotEmpty));

        // One slot was freed, so one element moves before pausing again.
        uart.handle_interrupt();
        assert_eq!(uart.rx_buffer_size(), 3);
        assert_eq!(hw.rx_fifo_entries(), 1);
        assert!(!hw.is_interrupt_enabled(InterruptSource::RxNotEmpty));

        // The last element is read from the FIFO once the ring buffer is
        // drained.
        let rest: Vec<u32> = (0..4).map(|_| uart.read_rx_data()).collect();
        assert_eq!(rest, vec![2, 3, 4, 5]);
    }

    #[test]
    fn empty_ring_reads_from_fifo() {
        let hw = MockFifo::new(8);
        let mut rx_storage = [0u8; 4];
        let uart = SpiUart::new(
            &hw,
            Buffering::buffered(&mut rx_storage, DataWidth::Byte).unwrap(),
            Buffering::Direct,
            SpiUartConfig {
                rx_flow_control: true,
            },
        );
        uart.start();

        hw.host_send(&[10, 11, 12, 13, 14]);
        uart.handle_interrupt();
        for expected in [10, 11, 12] {
            assert_eq!(uart.read_rx_data(), expected);
        }
        // Ring buffer is empty, the remainder is still in the FIFO.
        assert_eq!(uart.rx_buffer_size(), 0);
        assert_eq!(uart.read_rx_data(), 13);
        assert_eq!(hw.rx_fifo_entries(), 1);
    }

    #[test]
    fn clear_is_idempotent() {
        let hw = MockFifo::new(8);
        let mut rx_storage = [0u8; 8];
        let mut tx_storage = [0u8; 8];
        let uart = SpiUart::new(
            &hw,
            Buffering::buffered(&mut rx_storage, DataWidth::Byte).unwrap(),
            Buffering::buffered(&mut tx_storage, DataWidth::Byte).unwrap(),
            SpiUartConfig::default(),
        );
        uart.start();

        hw.host_send(&[1, 2, 3, 4, 5]);
        uart.handle_interrupt();
        hw.host_send(&[6, 7]);
        assert_eq!(uart.rx_buffer_size(), 5);

        uart.clear_rx_buffer();
        assert_eq!(uart.rx_buffer_size(), 0);
        assert_eq!(hw.rx_fifo_entries(), 0);
        uart.clear_rx_buffer();
        assert_eq!(uart.rx_buffer_size(), 0);
        assert!(hw.irq_enabled());

        // Eight fill the FIFO, the rest queue in the ring buffer.
        for b in 0..11 {
            uart.write_tx_data(b);
        }
        assert_eq!(uart.tx_buffer_size(), 3);
        uart.clear_tx_buffer();
        uart.clear_tx_buffer();
        assert_eq!(uart.tx_buffer_size(), 0);
        assert_eq!(hw.tx_fifo_entries(), 0);
        assert!(!hw.is_interrupt_enabled(InterruptSource::TxNotFull));
        assert!(hw.irq_enabled());
    }

    #[test]
    fn direct_mode_uses_fifo_counts() {
        let hw = MockFifo::new(8);
        let uart = SpiUart::new(
            &hw,
            Buffering::Direct,
            Buffering::Direct,
            SpiUartConfig::default(),
        );
        uart.start();

        hw.host_send(&[7, 8, 9]);
        assert_eq!(uart.rx_buffer_size(), 3);
        assert_eq!(uart.read_rx_data(), 7);
        assert_eq!(uart.rx_buffer_size(), 2);

        uart.put_array(&[1, 2]);
        assert_eq!(uart.tx_buffer_size(), 2);
        assert!(!uart.is_tx_idle());
        hw.shift_out_all();
        assert!(uart.is_tx_idle());

        uart.clear_rx_buffer();
        assert_eq!(uart.rx_buffer_size(), 0);
    }

    #[test]
    fn empty_put_array_is_noop() {
        let hw = MockFifo::new(8);
        let mut tx_storage = [0u8; 8];
        let uart = SpiUart::new(
            &hw,
            Buffering::Direct,
            Buffering::buffered(&mut tx_storage, DataWidth::Byte).unwrap(),
            SpiUartConfig::default(),
        );
        uart.put_array(&[]);
        assert_eq!(hw.tx_fifo_entries(), 0);
        assert_eq!(uart.tx_buffer_size(), 0);
    }

    #[test]
    fn start_and_stop() {
        let hw = MockFifo::new(8);
        let mut rx_storage = [0u8; 8];
        let uart = SpiUart::new(
            &hw,
            Buffering::buffered(&mut rx_storage, DataWidth::Byte).unwrap(),
            Buffering::Direct,
            SpiUartConfig::default(),
        );

        uart.start();
        assert!(hw.is_enabled());
        assert!(hw.irq_enabled());
        assert!(hw.is_interrupt_enabled(InterruptSource::RxNotEmpty));

        uart.stop();
        assert!(!hw.is_enabled());
        assert!(!hw.irq_enabled());
        assert_eq!(hw.tx_interrupt_mask(), 0);
    }

    #[test]
    fn clear_runs_with_irq_masked() {
        let hw = MockFifo::new(2);
        let mut rx_storage = [0u8; 8];
        let mut tx_storage = [0u8; 8];
        let uart = SpiUart::new(
            &hw,
            Buffering::buffered(&mut rx_storage, DataWidth::Byte).unwrap(),
            Buffering::buffered(&mut tx_storage, DataWidth::Byte).unwrap(),
            SpiUartConfig {
                rx_flow_control: true,
            },
        );
        uart.start();
        assert!(hw.irq_enabled());

        hw.host_send(&[1, 2]);
        uart.handle_interrupt();
        uart.put_array(&[1, 2, 3, 4]);
        assert_eq!(uart.rx_buffer_size(), 2);
        assert_eq!(uart.tx_buffer_size(), 2);

        let clears = hw.fifo_clears();
        uart.clear_rx_buffer();
        uart.clear_tx_buffer();

        assert_eq!(hw.fifo_clears(), clears + 2);
        assert_eq!(hw.fifo_clears_unmasked(), 0);
        assert!(hw.irq_enabled());
        assert_eq!(uart.rx_buffer_size(), 0);
        assert_eq!(uart.tx_buffer_size(), 0);
    }

    #[test]
    fn buffered_needs_room_for_two_elements() {
        let mut one_byte = [0u8; 1];
        assert!(matches!(
            Buffering::buffered(&mut one_byte, DataWidth::Byte),
            Err(ErrorCode::SIZE)
        ));

        let mut three_bytes = [0u8; 3];
        assert!(matches!(
            Buffering::buffered(&mut three_bytes, DataWidth::Word),
            Err(ErrorCode::SIZE)
        ));

        let mut empty: [u8; 0] = [];
        assert!(Buffering::buffered(&mut empty, DataWidth::Byte).is_err());

        let mut two_bytes = [0u8; 2];
        let ring = Buffering::buffered(&mut two_bytes, DataWidth::Byte).unwrap();
        assert!(ring.is_buffered());
    }

    #[test]
    fn disable_and_restore_interrupt_sources() {
        let hw = MockFifo::new(8);
        let mut rx_storage = [0u8; 8];
        let uart = SpiUart::new(
            &hw,
            Buffering::buffered(&mut rx_storage, DataWidth::Byte).unwrap(),
            Buffering::Direct,
            SpiUartConfig::default(),
        );
        uart.start();

        let rx_sources = uart.disable_rx_interrupts();
        assert_ne!(rx_sources, 0);
        assert!(!hw.is_interrupt_enabled(InterruptSource::RxNotEmpty));

        // With reception masked the FIFO is left alone.
        hw.host_send(&[1]);
        uart.handle_interrupt();
        assert_eq!(uart.rx_buffer_size(), 0);

        uart.restore_rx_interrupts(rx_sources);
        uart.handle_interrupt();
        assert_eq!(uart.rx_buffer_size(), 1);

        hw.enable_interrupt(InterruptSource::TxNotFull);
        let tx_sources = uart.disable_tx_interrupts();
        assert!(!hw.is_interrupt_enabled(InterruptSource::TxNotFull));
        uart.restore_tx_interrupts(tx_sources);
        assert!(hw.is_interrupt_enabled(InterruptSource::TxNotFull));
    }
}
