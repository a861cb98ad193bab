//! Radio register access for SX1276/SX1278 transceivers.
//!
//! The transmit sequencer only needs two primitives, expressed by the
//! [`RegisterInterface`] trait: write a byte sequence to a register and read a
//! single register. [`Sx127x`] implements it over an `embedded-hal`
//! `SpiDevice`; tests and simulators can provide their own implementation.
//!
//! Bring-up lives here as well:
//!
//! 1. [`hard_reset`] pulses the reset line
//! 2. [`configure`] programs bitrate, carrier, output power, preamble and packet mode
//!    from a [`RadioConfig`]
//! 3. the radio is left in standby, ready for
//!    [`PagerDriver::transmit`](crate::driver::PagerDriver::transmit)

mod config;
pub mod registers;
mod sx127x;

pub use config::*;
pub use sx127x::*;

/// Register-level access to the transceiver.
///
/// Implementations own the bus exclusively for the duration of each call.
pub trait RegisterInterface {
    /// Bus error type.
    type Error;

    /// Writes `data` to the register at `address`.
    ///
    /// Multi-byte data is written within one chip-select assertion, which for
    /// [`REG_FIFO`](registers::REG_FIFO) appends every byte to the FIFO.
    fn write_register(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Reads the register at `address`.
    fn read_register(&mut self, address: u8) -> Result<u8, Self::Error>;
}

impl<T: RegisterInterface + ?Sized> RegisterInterface for &mut T {
    type Error = T::Error;

    fn write_register(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_register(address, data)
    }

    fn read_register(&mut self, address: u8) -> Result<u8, Self::Error> {
        (**self).read_register(address)
    }
}
