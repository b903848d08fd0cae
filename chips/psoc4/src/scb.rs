// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Serial Communication Block (SCB) in SPI or UART mode.
//!
//! Exposes the FIFOs and interrupt sources of one SCB through
//! [`SpiUartFifo`] so that the hardware-independent transport in
//! `capsules_core::spi_uart` can drive it. The I2C and EZ parts of the block
//! are not modelled.
//!
//! The block must be disabled while it is configured:
//!
//! ```rust,ignore
//! let scb0 = unsafe { Scb::new(SCB0_BASE, Nvic::new(NVIC_BASE, interrupts::SCB0)) };
//! scb0.configure(ScbConfig::default())?;
//! ```

use core::cell::Cell;

use kernel::collections::ring_buffer::DataWidth;
use kernel::hil::spi_uart::{InterruptSource, SpiUartFifo};
use kernel::utilities::registers::interfaces::{ReadWriteable, Readable, Writeable};
use kernel::utilities::registers::{
    register_bitfields, register_structs, ReadOnly, ReadWrite, WriteOnly,
};
use kernel::utilities::StaticRef;
use kernel::ErrorCode;

use crate::nvic::Nvic;

register_structs! {
    pub ScbRegisters {
        (0x000 => ctrl: ReadWrite<u32, CTRL::Register>),
        (0x004 => _reserved0),
        (0x020 => spi_ctrl: ReadWrite<u32, SPI_CTRL::Register>),
        (0x024 => spi_status: ReadOnly<u32, SPI_STATUS::Register>),
        (0x028 => _reserved1),
        (0x040 => uart_ctrl: ReadWrite<u32, UART_CTRL::Register>),
        (0x044 => uart_tx_ctrl: ReadWrite<u32, UART_TX_CTRL::Register>),
        (0x048 => uart_rx_ctrl: ReadWrite<u32, UART_RX_CTRL::Register>),
        (0x04C => _reserved2),
        (0x050 => uart_flow_ctrl: ReadWrite<u32, UART_FLOW_CTRL::Register>),
        (0x054 => _reserved3),
        (0x200 => tx_ctrl: ReadWrite<u32, TX_CTRL::Register>),
        (0x204 => tx_fifo_ctrl: ReadWrite<u32, FIFO_CTRL::Register>),
        (0x208 => tx_fifo_status: ReadOnly<u32, FIFO_STATUS::Register>),
        (0x20C => _reserved4),
        (0x240 => tx_fifo_wr: WriteOnly<u32, FIFO_DATA::Register>),
        (0x244 => _reserved5),
        (0x300 => rx_ctrl: ReadWrite<u32, RX_CTRL::Register>),
        (0x304 => rx_fifo_ctrl: ReadWrite<u32, FIFO_CTRL::Register>),
        (0x308 => rx_fifo_status: ReadOnly<u32, FIFO_STATUS::Register>),
        (0x30C => _reserved6),
        (0x340 => rx_fifo_rd: ReadOnly<u32, FIFO_DATA::Register>),
        (0x344 => _reserved7),
        (0xF80 => intr_tx: ReadWrite<u32, INTR_TX::Register>),
        (0xF84 => _reserved8),
        (0xF88 => intr_tx_mask: ReadWrite<u32, INTR_TX::Register>),
        (0xF8C => _reserved9),
        (0xFC0 => intr_rx: ReadWrite<u32, INTR_RX::Register>),
        (0xFC4 => _reserved10),
        (0xFC8 => intr_rx_mask: ReadWrite<u32, INTR_RX::Register>),
        (0xFCC => @END),
    }
}

register_bitfields![u32,
CTRL [
    OVS OFFSET(0) NUMBITS(4) [],
    BYTE_MODE OFFSET(11) NUMBITS(1) [],
    MODE OFFSET(24) NUMBITS(2) [
        I2C = 0,
        SPI = 1,
        UART = 2
    ],
    ENABLED OFFSET(31) NUMBITS(1) []
],
SPI_CTRL [
    CPHA OFFSET(2) NUMBITS(1) [],
    CPOL OFFSET(3) NUMBITS(1) [],
    MODE OFFSET(24) NUMBITS(2) [
        MOTOROLA = 0,
        TI = 1,
        NATIONAL = 2
    ],
    MASTER_MODE OFFSET(31) NUMBITS(1) []
],
SPI_STATUS [
    BUS_BUSY OFFSET(0) NUMBITS(1) []
],
UART_CTRL [
    LOOPBACK OFFSET(16) NUMBITS(1) [],
    MODE OFFSET(24) NUMBITS(2) [
        STANDARD = 0,
        SMARTCARD = 1,
        IRDA = 2
    ]
],
UART_TX_CTRL [
    STOP_BITS OFFSET(0) NUMBITS(3) [],
    PARITY OFFSET(4) NUMBITS(1) [],
    PARITY_ENABLED OFFSET(5) NUMBITS(1) []
],
UART_RX_CTRL [
    STOP_BITS OFFSET(0) NUMBITS(3) [],
    PARITY OFFSET(4) NUMBITS(1) [],
    PARITY_ENABLED OFFSET(5) NUMBITS(1) [],
    MP_MODE OFFSET(10) NUMBITS(1) [],
    LIN_MODE OFFSET(12) NUMBITS(1) []
],
UART_FLOW_CTRL [
    TRIGGER_LEVEL OFFSET(0) NUMBITS(4) [],
    RTS_POLARITY OFFSET(16) NUMBITS(1) [],
    CTS_POLARITY OFFSET(24) NUMBITS(1) [],
    CTS_ENABLED OFFSET(25) NUMBITS(1) []
],
TX_CTRL [
    DATA_WIDTH OFFSET(0) NUMBITS(4) [],
    MSB_FIRST OFFSET(8) NUMBITS(1) []
],
RX_CTRL [
    DATA_WIDTH OFFSET(0) NUMBITS(4) [],
    MSB_FIRST OFFSET(8) NUMBITS(1) [],
    MEDIAN OFFSET(9) NUMBITS(1) []
],
FIFO_CTRL [
    TRIGGER_LEVEL OFFSET(0) NUMBITS(4) [],
    CLEAR OFFSET(16) NUMBITS(1) [],
    FREEZE OFFSET(17) NUMBITS(1) []
],
FIFO_STATUS [
    USED OFFSET(0) NUMBITS(5) [],
    SR_VALID OFFSET(15) NUMBITS(1) []
],
FIFO_DATA [
    DATA OFFSET(0) NUMBITS(16) []
],
INTR_TX [
    TRIGGER OFFSET(0) NUMBITS(1) [],
    NOT_FULL OFFSET(1) NUMBITS(1) [],
    EMPTY OFFSET(4) NUMBITS(1) [],
    OVERFLOW OFFSET(5) NUMBITS(1) [],
    UNDERFLOW OFFSET(6) NUMBITS(1) [],
    UART_DONE OFFSET(9) NUMBITS(1) []
],
INTR_RX [
    TRIGGER OFFSET(0) NUMBITS(1) [],
    NOT_EMPTY OFFSET(2) NUMBITS(1) [],
    FULL OFFSET(3) NUMBITS(1) [],
    OVERFLOW OFFSET(5) NUMBITS(1) [],
    UNDERFLOW OFFSET(6) NUMBITS(1) [],
    FRAME_ERROR OFFSET(8) NUMBITS(1) [],
    PARITY_ERROR OFFSET(9) NUMBITS(1) []
]
];

pub const SCB0_BASE: StaticRef<ScbRegisters> =
    unsafe { StaticRef::new(0x40060000 as *const ScbRegisters) };
pub const SCB1_BASE: StaticRef<ScbRegisters> =
    unsafe { StaticRef::new(0x40070000 as *const ScbRegisters) };

/// FIFO depth in elements. Byte mode splits each 16-bit entry in two.
const FIFO_DEPTH: usize = 8;
const FIFO_DEPTH_BYTE_MODE: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScbMode {
    /// Motorola SPI, clocked by the host.
    SpiSlave,
    /// Motorola SPI, driving the clock.
    SpiMaster,
    /// Standard UART, 1 stop bit, no parity.
    Uart,
}

#[derive(Clone, Copy, Debug)]
pub struct ScbConfig {
    pub mode: ScbMode,
    /// Bits per element, 4 to 16.
    pub data_width: u8,
    /// Pack two elements per FIFO entry, doubling the FIFO depth. Requires
    /// `data_width <= 8`.
    pub byte_mode: bool,
    /// SCB clock cycles per bit (UART) or per SCLK period (SPI master).
    pub oversampling: u8,
    /// "TX trigger" fires while the TX FIFO holds fewer elements than this.
    pub tx_trigger_level: u8,
    /// "RX trigger" fires while the RX FIFO holds more elements than this.
    pub rx_trigger_level: u8,
    /// Have the block deassert RTS when the RX FIFO fills up and hold
    /// transmission while CTS is inactive. UART only.
    pub hardware_flow_control: bool,
}

impl Default for ScbConfig {
    fn default() -> ScbConfig {
        ScbConfig {
            mode: ScbMode::SpiSlave,
            data_width: 8,
            byte_mode: true,
            oversampling: 16,
            tx_trigger_level: 0,
            rx_trigger_level: 7,
            hardware_flow_control: false,
        }
    }
}

impl ScbConfig {
    /// Element width for ring buffers sitting in front of this block.
    pub fn ring_buffer_width(&self) -> DataWidth {
        if self.data_width <= 8 {
            DataWidth::Byte
        } else {
            DataWidth::Word
        }
    }

    fn fifo_depth(&self) -> usize {
        if self.byte_mode {
            FIFO_DEPTH_BYTE_MODE
        } else {
            FIFO_DEPTH
        }
    }

    fn validate(&self) -> Result<(), ErrorCode> {
        if !(4..=16).contains(&self.data_width) {
            return Err(ErrorCode::SIZE);
        }
        if self.byte_mode && self.data_width > 8 {
            return Err(ErrorCode::INVAL);
        }
        let oversampling = match self.mode {
            ScbMode::Uart => 8..=16,
            ScbMode::SpiMaster => 2..=16,
            // Sampled on the host's clock.
            ScbMode::SpiSlave => 1..=16,
        };
        if !oversampling.contains(&self.oversampling) {
            return Err(ErrorCode::INVAL);
        }
        let depth = self.fifo_depth();
        if self.tx_trigger_level as usize >= depth || self.rx_trigger_level as usize >= depth {
            return Err(ErrorCode::INVAL);
        }
        if self.hardware_flow_control && self.mode != ScbMode::Uart {
            return Err(ErrorCode::NOSUPPORT);
        }
        Ok(())
    }
}

pub struct Scb {
    registers: StaticRef<ScbRegisters>,
    nvic: Nvic,
    mode: Cell<ScbMode>,
    fifo_depth: Cell<usize>,
}

impl Scb {
    pub const fn new(registers: StaticRef<ScbRegisters>, nvic: Nvic) -> Scb {
        Scb {
            registers,
            nvic,
            mode: Cell::new(ScbMode::SpiSlave),
            fifo_depth: Cell::new(FIFO_DEPTH),
        }
    }

    /// Apply `config`. Fails with `BUSY` while the block is enabled.
    pub fn configure(&self, config: ScbConfig) -> Result<(), ErrorCode> {
        if self.registers.ctrl.is_set(CTRL::ENABLED) {
            return Err(ErrorCode::BUSY);
        }
        config.validate()?;

        let regs = self.registers;
        let width = config.data_width as u32 - 1;
        let byte_mode = if config.byte_mode {
            CTRL::BYTE_MODE::SET
        } else {
            CTRL::BYTE_MODE::CLEAR
        };
        let mode = match config.mode {
            ScbMode::SpiSlave | ScbMode::SpiMaster => CTRL::MODE::SPI,
            ScbMode::Uart => CTRL::MODE::UART,
        };
        regs.ctrl
            .write(mode + CTRL::OVS.val(config.oversampling as u32 - 1) + byte_mode);

        match config.mode {
            ScbMode::SpiSlave | ScbMode::SpiMaster => {
                let master = if config.mode == ScbMode::SpiMaster {
                    SPI_CTRL::MASTER_MODE::SET
                } else {
                    SPI_CTRL::MASTER_MODE::CLEAR
                };
                regs.spi_ctrl.write(SPI_CTRL::MODE::MOTOROLA + master);
                regs.tx_ctrl
                    .write(TX_CTRL::DATA_WIDTH.val(width) + TX_CTRL::MSB_FIRST::SET);
                regs.rx_ctrl
                    .write(RX_CTRL::DATA_WIDTH.val(width) + RX_CTRL::MSB_FIRST::SET);
            }
            ScbMode::Uart => {
                regs.uart_ctrl.write(UART_CTRL::MODE::STANDARD);
                regs.uart_tx_ctrl
                    .write(UART_TX_CTRL::STOP_BITS.val(1) + UART_TX_CTRL::PARITY_ENABLED::CLEAR);
                regs.uart_rx_ctrl.write(
                    UART_RX_CTRL::STOP_BITS.val(1)
                        + UART_RX_CTRL::PARITY_ENABLED::CLEAR
                        + UART_RX_CTRL::MP_MODE::CLEAR
                        + UART_RX_CTRL::LIN_MODE::CLEAR,
                );
                if config.hardware_flow_control {
                    // RTS drops once the FIFO is one short of full.
                    regs.uart_flow_ctrl.write(
                        UART_FLOW_CTRL::TRIGGER_LEVEL.val(config.fifo_depth() as u32 - 1)
                            + UART_FLOW_CTRL::CTS_ENABLED::SET,
                    );
                } else {
                    regs.uart_flow_ctrl.write(UART_FLOW_CTRL::CTS_ENABLED::CLEAR);
                }
                regs.tx_ctrl
                    .write(TX_CTRL::DATA_WIDTH.val(width) + TX_CTRL::MSB_FIRST::CLEAR);
                regs.rx_ctrl
                    .write(RX_CTRL::DATA_WIDTH.val(width) + RX_CTRL::MSB_FIRST::CLEAR);
            }
        }

        regs.tx_fifo_ctrl
            .write(FIFO_CTRL::TRIGGER_LEVEL.val(config.tx_trigger_level as u32));
        regs.rx_fifo_ctrl
            .write(FIFO_CTRL::TRIGGER_LEVEL.val(config.rx_trigger_level as u32));
        self.clear_tx_fifo();
        self.clear_rx_fifo();

        regs.intr_tx_mask.set(0);
        regs.intr_rx_mask.set(0);

        self.mode.set(config.mode);
        self.fifo_depth.set(config.fifo_depth());
        Ok(())
    }

    fn pulse_clear(fifo_ctrl: &ReadWrite<u32, FIFO_CTRL::Register>) {
        fifo_ctrl.modify(FIFO_CTRL::CLEAR::SET);
        fifo_ctrl.modify(FIFO_CTRL::CLEAR::CLEAR);
    }
}

impl SpiUartFifo for Scb {
    fn fifo_depth(&self) -> usize {
        self.fifo_depth.get()
    }

    fn enable(&self) {
        self.registers.ctrl.modify(CTRL::ENABLED::SET);
    }

    fn disable(&self) {
        self.registers.ctrl.modify(CTRL::ENABLED::CLEAR);
        self.nvic.clear_pending();
    }

    fn tx_fifo_entries(&self) -> usize {
        self.registers.tx_fifo_status.read(FIFO_STATUS::USED) as usize
    }

    fn tx_fifo_write(&self, data: u32) {
        self.registers.tx_fifo_wr.write(FIFO_DATA::DATA.val(data));
    }

    fn clear_tx_fifo(&self) {
        Self::pulse_clear(&self.registers.tx_fifo_ctrl);
    }

    fn tx_shift_register_valid(&self) -> bool {
        self.registers.tx_fifo_status.is_set(FIFO_STATUS::SR_VALID)
    }

    fn is_bus_busy(&self) -> bool {
        match self.mode.get() {
            ScbMode::SpiSlave | ScbMode::SpiMaster => {
                self.registers.spi_status.is_set(SPI_STATUS::BUS_BUSY)
            }
            ScbMode::Uart => false,
        }
    }

    fn rx_fifo_entries(&self) -> usize {
        self.registers.rx_fifo_status.read(FIFO_STATUS::USED) as usize
    }

    fn rx_fifo_read(&self) -> u32 {
        self.registers.rx_fifo_rd.read(FIFO_DATA::DATA)
    }

    fn clear_rx_fifo(&self) {
        Self::pulse_clear(&self.registers.rx_fifo_ctrl);
    }

    fn set_rx_fifo_frozen(&self, frozen: bool) {
        if frozen {
            self.registers.rx_fifo_ctrl.modify(FIFO_CTRL::FREEZE::SET);
        } else {
            self.registers.rx_fifo_ctrl.modify(FIFO_CTRL::FREEZE::CLEAR);
        }
    }

    fn is_rx_fifo_frozen(&self) -> bool {
        self.registers.rx_fifo_ctrl.is_set(FIFO_CTRL::FREEZE)
    }

    fn enable_interrupt(&self, source: InterruptSource) {
        match source {
            InterruptSource::RxNotEmpty => {
                self.registers.intr_rx_mask.modify(INTR_RX::NOT_EMPTY::SET)
            }
            InterruptSource::RxOverflow => {
                self.registers.intr_rx_mask.modify(INTR_RX::OVERFLOW::SET)
            }
            InterruptSource::TxNotFull => {
                self.registers.intr_tx_mask.modify(INTR_TX::NOT_FULL::SET)
            }
        }
    }

    fn disable_interrupt(&self, source: InterruptSource) {
        match source {
            InterruptSource::RxNotEmpty => {
                self.registers.intr_rx_mask.modify(INTR_RX::NOT_EMPTY::CLEAR)
            }
            InterruptSource::RxOverflow => {
                self.registers.intr_rx_mask.modify(INTR_RX::OVERFLOW::CLEAR)
            }
            InterruptSource::TxNotFull => {
                self.registers.intr_tx_mask.modify(INTR_TX::NOT_FULL::CLEAR)
            }
        }
    }

    fn is_interrupt_enabled(&self, source: InterruptSource) -> bool {
        match source {
            InterruptSource::RxNotEmpty => self.registers.intr_rx_mask.is_set(INTR_RX::NOT_EMPTY),
            InterruptSource::RxOverflow => self.registers.intr_rx_mask.is_set(INTR_RX::OVERFLOW),
            InterruptSource::TxNotFull => self.registers.intr_tx_mask.is_set(INTR_TX::NOT_FULL),
        }
    }

    fn is_interrupt_pending(&self, source: InterruptSource) -> bool {
        match source {
            InterruptSource::RxNotEmpty => self.registers.intr_rx.is_set(INTR_RX::NOT_EMPTY),
            InterruptSource::RxOverflow => self.registers.intr_rx.is_set(INTR_RX::OVERFLOW),
            InterruptSource::TxNotFull => self.registers.intr_tx.is_set(INTR_TX::NOT_FULL),
        }
    }

    // The cause registers are write-one-to-clear.
    fn clear_interrupt(&self, source: InterruptSource) {
        match source {
            InterruptSource::RxNotEmpty => self.registers.intr_rx.write(INTR_RX::NOT_EMPTY::SET),
            InterruptSource::RxOverflow => self.registers.intr_rx.write(INTR_RX::OVERFLOW::SET),
            InterruptSource::TxNotFull => self.registers.intr_tx.write(INTR_TX::NOT_FULL::SET),
        }
    }

    fn clear_rx_interrupts(&self) {
        self.registers.intr_rx.set(self.registers.intr_rx.get());
    }

    fn clear_tx_interrupts(&self) {
        self.registers.intr_tx.set(self.registers.intr_tx.get());
    }

    fn rx_interrupt_mask(&self) -> u32 {
        self.registers.intr_rx_mask.get()
    }

    fn set_rx_interrupt_mask(&self, mask: u32) {
        self.registers.intr_rx_mask.set(mask);
    }

    fn tx_interrupt_mask(&self) -> u32 {
        self.registers.intr_tx_mask.get()
    }

    fn set_tx_interrupt_mask(&self, mask: u32) {
        self.registers.intr_tx_mask.set(mask);
    }

    fn disable_irq(&self) {
        self.nvic.disable();
    }

    fn enable_irq(&self) {
        self.nvic.enable();
    }
}
