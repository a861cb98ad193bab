//! SX1276/SX1278 FSK/OOK register map.
//!
//! Only the registers the pager touches are listed. Addresses and bit layouts
//! follow the FSK/OOK register bank of the SX1276/77/78/79 datasheet.

use bitflags::bitflags;

/// FIFO read/write access (RegFifo).
pub const REG_FIFO: u8 = 0x00;
/// Operating mode and modem selection (RegOpMode).
pub const REG_OP_MODE: u8 = 0x01;
/// Bit rate setting, most significant byte (RegBitrateMsb).
pub const REG_BITRATE_MSB: u8 = 0x02;
/// Bit rate setting, least significant byte (RegBitrateLsb).
pub const REG_BITRATE_LSB: u8 = 0x03;
/// Frequency deviation, most significant bits (RegFdevMsb).
pub const REG_FDEV_MSB: u8 = 0x04;
/// Frequency deviation, least significant byte (RegFdevLsb).
pub const REG_FDEV_LSB: u8 = 0x05;
/// RF carrier frequency, most significant byte (RegFrfMsb).
pub const REG_FRF_MSB: u8 = 0x06;
/// RF carrier frequency, middle byte (RegFrfMid).
pub const REG_FRF_MID: u8 = 0x07;
/// RF carrier frequency, least significant byte (RegFrfLsb).
pub const REG_FRF_LSB: u8 = 0x08;
/// PA selection and output power control (RegPaConfig).
pub const REG_PA_CONFIG: u8 = 0x09;
/// Preamble length, most significant byte (RegPreambleMsb).
pub const REG_PREAMBLE_MSB: u8 = 0x25;
/// Preamble length, least significant byte (RegPreambleLsb).
pub const REG_PREAMBLE_LSB: u8 = 0x26;
/// Sync word recognition control (RegSyncConfig).
pub const REG_SYNC_CONFIG: u8 = 0x27;
/// Packet mode settings (RegPacketConfig1).
pub const REG_PACKET_CONFIG1: u8 = 0x30;
/// Packet mode settings (RegPacketConfig2).
pub const REG_PACKET_CONFIG2: u8 = 0x31;
/// Payload length in fixed-length packet mode (RegPayloadLength).
pub const REG_PAYLOAD_LENGTH: u8 = 0x32;
/// FIFO threshold and TX start condition (RegFifoThresh).
pub const REG_FIFO_THRESH: u8 = 0x35;
/// Status flags: FIFO handling and packet state (RegIrqFlags2).
pub const REG_IRQ_FLAGS2: u8 = 0x3f;
/// High power PA settings (RegPaDac).
pub const REG_PA_DAC: u8 = 0x4d;

/// Set on the address byte of a write access.
pub const SPI_WRITE_MASK: u8 = 0x80;

/// RegPaConfig: route the output through the PA_BOOST pin.
pub const PA_SELECT_BOOST: u8 = 0x80;
/// RegPaDac: default PA_BOOST drive (up to +17 dBm).
pub const PA_DAC_DEFAULT: u8 = 0x04;
/// RegPaDac: +20 dBm option on PA_BOOST.
pub const PA_DAC_BOOST: u8 = 0x07;

/// RegSyncConfig: preamble polarity 0x55, no sync word.
///
/// POCSAG polarity is the inverse of the radio's, so the inverted preamble is
/// what a pager sees as the standard `1010...` preamble.
pub const SYNC_CONFIG_PREAMBLE_INVERTED: u8 = 0x20;
/// RegPacketConfig1: fixed length, no DC-free coding, no CRC, no address filtering.
pub const PACKET_CONFIG1_FIXED_RAW: u8 = 0x00;
/// RegPacketConfig2: packet mode (as opposed to continuous mode).
pub const PACKET_CONFIG2_PACKET_MODE: u8 = 0x40;
/// RegFifoThresh: start transmitting as soon as the FIFO is not empty.
pub const FIFO_THRESH_TX_START_NOT_EMPTY: u8 = 0x80;
/// RegFifoThresh: mask of the threshold field.
pub const FIFO_THRESH_MASK: u8 = 0x3f;

/// Transceiver operating modes in FSK/OOK mode (RegOpMode bits 2..0).
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
#[repr(u8)]
pub enum OpMode {
    /// Lowest power; register contents are kept.
    Sleep = 0x00,
    /// Crystal oscillator running, RF chain off.
    Standby = 0x01,
    /// Transmitting the FIFO contents.
    Tx = 0x03,
}

impl OpMode {
    /// Raw RegOpMode value, FSK modem selected.
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

bitflags! {
    /// RegIrqFlags2 status bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct IrqFlags2: u8 {
        /// Set when the FIFO overran; cleared by writing 1.
        const FIFO_OVERRUN = 0x10;
        /// Set while the FIFO holds more bytes than the FifoThreshold.
        const FIFO_LEVEL = 0x20;
        /// Set when the FIFO is empty.
        const FIFO_EMPTY = 0x40;
        /// Set when the FIFO is full.
        const FIFO_FULL = 0x80;
        /// Set in TX when the complete packet has been sent.
        const PACKET_SENT = 0x08;
        /// Set in RX when the payload is ready.
        const PAYLOAD_READY = 0x04;
        /// Set in RX when the CRC of the payload is valid.
        const CRC_OK = 0x02;
        /// Low battery detected.
        const LOW_BAT = 0x01;
    }
}
