//! Error types for encoding and transmitting pages.
//!
//! Encoding problems are reported as [`EncodeError`] before any register is
//! touched. Everything that can go wrong once the radio is involved is an
//! [`Error`], which also wraps [`EncodeError`] so that
//! [`PagerDriver::send`](crate::driver::PagerDriver::send) has a single error type.
//!
//! A text that is too long is not an error: it is truncated and the resulting
//! [`Transmission`](crate::encoding::Transmission) carries a [`Warning`].

use thiserror::Error;

use crate::wait::WaitTarget;

/// Rejected page parameters.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum EncodeError {
    /// Capcode is zero or does not fit in 21 bits.
    #[error("invalid address {0}")]
    InvalidAddress(u32),
    /// Function code is outside `0..=3`.
    #[error("invalid source {0}")]
    InvalidFunction(u8),
    /// The message text is empty.
    #[error("no text")]
    NoText,
}

/// Non-fatal conditions raised while building a transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Warning {
    /// The text was longer than [`MAX_TEXT_LEN`](crate::consts::MAX_TEXT_LEN)
    /// characters and only the first ones were encoded.
    Truncated {
        /// Character count of the text as supplied.
        original_len: usize,
    },
}

/// Errors returned by the transmit sequencer.
///
/// `E` is the error type of the [`RegisterInterface`](crate::radio::RegisterInterface)
/// in use, e.g. the SPI error of an [`Sx127x`](crate::radio::Sx127x).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Error<E> {
    /// The page could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// A register transaction failed.
    #[error("register bus error: {0:?}")]
    Bus(E),
    /// Nothing to transmit.
    #[error("empty payload")]
    EmptyPayload,
    /// The byte stream does not fit the 8-bit payload length register.
    #[error("payload of {0} bytes exceeds the payload length register")]
    PayloadTooLong(usize),
    /// The radio did not raise the awaited status flag in time.
    #[error("timed out waiting for {0}")]
    Timeout(WaitTarget),
    /// The abort signal was raised while waiting.
    #[error("aborted while waiting for {0}")]
    Aborted(WaitTarget),
}
