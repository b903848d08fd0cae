// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Interface to the FIFOs of a serial communication block in SPI or UART
//! mode.
//!
//! This is the register-file view the software transport needs: entry
//! counts, data registers, FIFO control and the interrupt sources that gate
//! buffer occupancy. Chip crates implement it on top of their memory mapped
//! registers; the hardware-independent transport in `capsules_core` is
//! generic over it.
//!
//! Data values are passed as `u32` with the element in the low bits, since
//! the configured data width can be anywhere between 4 and 16 bits.

/// Interrupt sources the software transport manages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterruptSource {
    /// RX FIFO holds at least one element.
    RxNotEmpty,
    /// An element arrived while the RX FIFO was full and was lost.
    RxOverflow,
    /// TX FIFO has room for at least one element.
    TxNotFull,
}

pub trait SpiUartFifo {
    /// Depth of each hardware FIFO, in elements.
    fn fifo_depth(&self) -> usize;

    /// Enable the block.
    fn enable(&self);

    /// Disable the block. FIFO contents are lost.
    fn disable(&self);

    /// Number of elements waiting in the TX FIFO.
    fn tx_fifo_entries(&self) -> usize;

    /// Whether the TX FIFO has no room left.
    fn tx_fifo_full(&self) -> bool {
        self.tx_fifo_entries() >= self.fifo_depth()
    }

    /// Push one element into the TX FIFO. Writing a full FIFO loses the
    /// element.
    fn tx_fifo_write(&self, data: u32);

    /// Drop every element in the TX FIFO.
    fn clear_tx_fifo(&self);

    /// Whether the transmit shift register still holds an element that has
    /// not been shifted out.
    fn tx_shift_register_valid(&self) -> bool;

    /// Whether a transfer is in progress on the bus.
    fn is_bus_busy(&self) -> bool;

    /// Number of elements waiting in the RX FIFO.
    fn rx_fifo_entries(&self) -> usize;

    /// Pop one element from the RX FIFO. The value is undefined when the
    /// FIFO is empty.
    fn rx_fifo_read(&self) -> u32;

    /// Drop every element in the RX FIFO.
    fn clear_rx_fifo(&self);

    /// Stop (`true`) or resume (`false`) accepting received elements into
    /// the RX FIFO. Elements arriving while frozen are dropped by hardware.
    fn set_rx_fifo_frozen(&self, frozen: bool);

    fn is_rx_fifo_frozen(&self) -> bool;

    fn enable_interrupt(&self, source: InterruptSource);

    fn disable_interrupt(&self, source: InterruptSource);

    fn is_interrupt_enabled(&self, source: InterruptSource) -> bool;

    /// Whether `source` has fired, regardless of its enable state.
    fn is_interrupt_pending(&self, source: InterruptSource) -> bool;

    /// Acknowledge a fired interrupt source.
    fn clear_interrupt(&self, source: InterruptSource);

    /// Acknowledge every RX interrupt source.
    fn clear_rx_interrupts(&self);

    /// Acknowledge every TX interrupt source.
    fn clear_tx_interrupts(&self);

    /// Raw RX interrupt enable mask. The bit layout is chip-defined and only
    /// meant to be handed back to `set_rx_interrupt_mask`.
    fn rx_interrupt_mask(&self) -> u32;

    fn set_rx_interrupt_mask(&self, mask: u32);

    /// Raw TX interrupt enable mask, see `rx_interrupt_mask`.
    fn tx_interrupt_mask(&self) -> u32;

    fn set_tx_interrupt_mask(&self, mask: u32);

    /// Mask the block's interrupt line so the interrupt service routine
    /// cannot run. Used to protect multi-field updates of shared state.
    fn disable_irq(&self);

    /// Unmask the block's interrupt line.
    fn enable_irq(&self);
}
