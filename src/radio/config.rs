use libm::round;

use super::RegisterInterface;
use super::registers::{
    FIFO_THRESH_MASK, FIFO_THRESH_TX_START_NOT_EMPTY, OpMode, PA_DAC_BOOST, PA_DAC_DEFAULT,
    PA_SELECT_BOOST, PACKET_CONFIG1_FIXED_RAW, PACKET_CONFIG2_PACKET_MODE, REG_BITRATE_LSB,
    REG_BITRATE_MSB, REG_FDEV_LSB, REG_FDEV_MSB, REG_FIFO_THRESH, REG_FRF_LSB, REG_FRF_MID,
    REG_FRF_MSB, REG_OP_MODE, REG_PA_CONFIG, REG_PA_DAC, REG_PACKET_CONFIG1, REG_PACKET_CONFIG2,
    REG_PREAMBLE_LSB, REG_PREAMBLE_MSB, REG_SYNC_CONFIG, SYNC_CONFIG_PREAMBLE_INVERTED,
};

/// Crystal oscillator frequency of the SX1276/SX1278 modules, in Hz.
pub const FXOSC_HZ: u32 = 32_000_000;
/// The frequency synthesizer step is `FXOSC / 2^19`.
pub const FSTEP_SHIFT: u32 = 19;
/// Amateur-radio paging frequency used in Europe, in Hz.
pub const DEFAULT_FREQUENCY_HZ: u32 = 439_987_500;
/// POCSAG bit rate most pagers decode.
pub const DEFAULT_BITRATE: u32 = 1_200;
/// Preamble length in bytes.
///
/// POCSAG asks for at least 576 bits at 512 bit/s; keeping the same duration
/// at 1200 bit/s gives about 180 bytes.
pub const DEFAULT_PREAMBLE_LEN: u16 = 180;
/// FIFO level below which the sequencer refills, in bytes.
pub const DEFAULT_FIFO_THRESHOLD: u8 = 30;
/// Lowest output power the PA_BOOST path supports, in dBm.
pub const MIN_TX_POWER_DBM: i8 = 5;
/// Highest output power the PA_BOOST path supports, in dBm.
pub const MAX_TX_POWER_DBM: i8 = 23;
/// Output power above which the +20 dBm PA_DAC option is needed, in dBm.
pub const PA_DAC_THRESHOLD_DBM: i8 = 20;

/// RF settings programmed by [`configure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct RadioConfig {
    /// Carrier frequency in Hz.
    pub frequency_hz: u32,
    /// FSK bit rate in bits per second.
    pub bitrate: u32,
    /// Frequency deviation in Hz; `None` keeps the chip default (5 kHz).
    pub deviation_hz: Option<u32>,
    /// Output power in dBm, clamped to `5..=23`.
    pub tx_power_dbm: i8,
    /// Preamble length in bytes.
    pub preamble_len: u16,
    /// FIFO threshold in bytes (`0..=63`).
    pub fifo_threshold: u8,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            bitrate: DEFAULT_BITRATE,
            deviation_hz: None,
            tx_power_dbm: 2,
            preamble_len: DEFAULT_PREAMBLE_LEN,
            fifo_threshold: DEFAULT_FIFO_THRESHOLD,
        }
    }
}

impl RadioConfig {
    /// RegBitrate value, `FXOSC / bitrate` rounded to the nearest integer.
    pub fn bitrate_register(&self) -> u16 {
        let divider = round(f64::from(FXOSC_HZ) / f64::from(self.bitrate.max(1)));
        divider.clamp(1.0, f64::from(u16::MAX)) as u16
    }

    /// RegFrf value, `frequency / FSTEP` truncated to 24 bits.
    pub fn frequency_register(&self) -> u32 {
        let frf = (u64::from(self.frequency_hz) << FSTEP_SHIFT) / u64::from(FXOSC_HZ);
        (frf as u32) & 0x00ff_ffff
    }

    /// RegFdev value for `deviation_hz`, truncated to 14 bits.
    pub fn deviation_register(&self) -> Option<u16> {
        self.deviation_hz.map(|hz| {
            let fdev = (u64::from(hz) << FSTEP_SHIFT) / u64::from(FXOSC_HZ);
            (fdev as u16) & 0x3fff
        })
    }

    /// RegPaDac and RegPaConfig values for `tx_power_dbm`.
    pub fn power_registers(&self) -> (u8, u8) {
        let mut power = self.tx_power_dbm.clamp(MIN_TX_POWER_DBM, MAX_TX_POWER_DBM);
        let pa_dac = if power > PA_DAC_THRESHOLD_DBM {
            power -= 3;
            PA_DAC_BOOST
        } else {
            PA_DAC_DEFAULT
        };
        (pa_dac, PA_SELECT_BOOST | (power - MIN_TX_POWER_DBM) as u8)
    }

    /// RegFifoThresh value: threshold plus "start TX when FIFO not empty".
    pub fn fifo_thresh_register(&self) -> u8 {
        FIFO_THRESH_TX_START_NOT_EMPTY | (self.fifo_threshold & FIFO_THRESH_MASK)
    }
}

/// Programs the transceiver for POCSAG transmission in FSK packet mode.
///
/// The chip is put to sleep (FSK modem), bitrate, carrier, deviation and output
/// power are set, then the radio goes to standby and the packet engine is set up
/// for fixed-length raw packets with an inverted preamble and no sync word.
/// Run this once after [`hard_reset`](super::hard_reset).
///
/// # Errors
/// Returns the first register write that fails.
pub fn configure<R: RegisterInterface + ?Sized>(
    radio: &mut R,
    config: &RadioConfig,
) -> Result<(), R::Error> {
    radio.write_register(REG_OP_MODE, &[OpMode::Sleep.bits()])?;

    let [bitrate_msb, bitrate_lsb] = config.bitrate_register().to_be_bytes();
    radio.write_register(REG_BITRATE_MSB, &[bitrate_msb])?;
    radio.write_register(REG_BITRATE_LSB, &[bitrate_lsb])?;

    let [_, frf_msb, frf_mid, frf_lsb] = config.frequency_register().to_be_bytes();
    radio.write_register(REG_FRF_MSB, &[frf_msb])?;
    radio.write_register(REG_FRF_MID, &[frf_mid])?;
    radio.write_register(REG_FRF_LSB, &[frf_lsb])?;

    if let Some(fdev) = config.deviation_register() {
        let [fdev_msb, fdev_lsb] = fdev.to_be_bytes();
        radio.write_register(REG_FDEV_MSB, &[fdev_msb])?;
        radio.write_register(REG_FDEV_LSB, &[fdev_lsb])?;
    }

    let (pa_dac, pa_config) = config.power_registers();
    radio.write_register(REG_PA_DAC, &[pa_dac])?;
    radio.write_register(REG_PA_CONFIG, &[pa_config])?;

    radio.write_register(REG_OP_MODE, &[OpMode::Standby.bits()])?;

    let [preamble_msb, preamble_lsb] = config.preamble_len.to_be_bytes();
    radio.write_register(REG_PREAMBLE_MSB, &[preamble_msb])?;
    radio.write_register(REG_PREAMBLE_LSB, &[preamble_lsb])?;

    radio.write_register(REG_SYNC_CONFIG, &[SYNC_CONFIG_PREAMBLE_INVERTED])?;
    radio.write_register(REG_PACKET_CONFIG1, &[PACKET_CONFIG1_FIXED_RAW])?;
    radio.write_register(REG_PACKET_CONFIG2, &[PACKET_CONFIG2_PACKET_MODE])?;
    radio.write_register(REG_FIFO_THRESH, &[config.fifo_thresh_register()])?;

    debug!(
        "radio configured: {} Hz, {} bit/s",
        config.frequency_hz, config.bitrate
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radio::Sx127x;
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    fn write(address: u8, value: u8) -> [SpiTransaction<u8>; 4] {
        [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![address | 0x80]),
            SpiTransaction::write_vec(vec![value]),
            SpiTransaction::transaction_end(),
        ]
    }

    #[test]
    fn test_default_register_values() {
        let config = RadioConfig::default();
        assert_eq!(config.bitrate_register(), 0x682b);
        assert_eq!(config.frequency_register(), 0x6d_ff33);
        assert_eq!(config.power_registers(), (PA_DAC_DEFAULT, 0x80));
        assert_eq!(config.fifo_thresh_register(), 0x9e);
        assert_eq!(config.deviation_register(), None);
    }

    #[test]
    fn test_power_is_clamped_and_boosted() {
        let mut config = RadioConfig::default();
        config.tx_power_dbm = 17;
        assert_eq!(config.power_registers(), (PA_DAC_DEFAULT, 0x80 | 12));
        config.tx_power_dbm = 23;
        assert_eq!(config.power_registers(), (PA_DAC_BOOST, 0x80 | 15));
        config.tx_power_dbm = 30;
        assert_eq!(config.power_registers(), (PA_DAC_BOOST, 0x80 | 15));
    }

    #[test]
    fn test_deviation_register() {
        let config = RadioConfig {
            deviation_hz: Some(4_500),
            ..RadioConfig::default()
        };
        assert_eq!(config.deviation_register(), Some(73));
    }

    #[test]
    fn test_configure_writes_register_sequence() {
        let expectations: Vec<SpiTransaction<u8>> = [
            write(0x01, 0x00),
            write(0x02, 0x68),
            write(0x03, 0x2b),
            write(0x06, 0x6d),
            write(0x07, 0xff),
            write(0x08, 0x33),
            write(0x4d, 0x04),
            write(0x09, 0x80),
            write(0x01, 0x01),
            write(0x25, 0x00),
            write(0x26, 180),
            write(0x27, 0x20),
            write(0x30, 0x00),
            write(0x31, 0x40),
            write(0x35, 0x9e),
        ]
        .into_iter()
        .flatten()
        .collect();
        let mut radio = Sx127x::new(SpiMock::new(&expectations));
        assert!(configure(&mut radio, &RadioConfig::default()).is_ok());
        radio.release().done();
    }
}
