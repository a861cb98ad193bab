use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{Operation, SpiDevice};

use super::RegisterInterface;
use super::registers::SPI_WRITE_MASK;

/// How long the reset line is held low, in milliseconds.
pub const RESET_PULSE_MS: u32 = 100;

/// SX1276/SX1278 register interface over SPI.
///
/// Wraps an `embedded-hal` [`SpiDevice`]; chip select is handled by the device,
/// so every register access is one SPI transaction.
#[derive(Debug)]
pub struct Sx127x<SPI> {
    spi: SPI,
}

impl<SPI> Sx127x<SPI> {
    /// Creates a new instance wrapping the provided SPI device.
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Releases the underlying SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiDevice> RegisterInterface for Sx127x<SPI> {
    type Error = SPI::Error;

    fn write_register(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.spi.transaction(&mut [
            Operation::Write(&[address | SPI_WRITE_MASK]),
            Operation::Write(data),
        ])
    }

    fn read_register(&mut self, address: u8) -> Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.spi.transaction(&mut [
            Operation::Write(&[address & !SPI_WRITE_MASK]),
            Operation::Read(&mut value),
        ])?;
        Ok(value[0])
    }
}

/// Pulses the transceiver reset line and waits for the chip to come up.
///
/// # Arguments
/// - `reset`: the pin wired to the radio's NRESET
/// - `delay`: a delay provider
/// - `settle_ms`: time to wait after releasing reset before the chip is configured
///
/// # Errors
/// Returns the pin error if driving the reset line fails.
pub fn hard_reset<P, D>(reset: &mut P, delay: &mut D, settle_ms: u32) -> Result<(), P::Error>
where
    P: OutputPin,
    D: DelayNs,
{
    reset.set_low()?;
    delay.delay_ms(RESET_PULSE_MS);
    reset.set_high()?;
    delay.delay_ms(settle_ms);
    Ok(())
}
