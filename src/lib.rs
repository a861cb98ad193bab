//! # pocsag-tx
//!
//! A portable, no_std Rust POCSAG paging transmitter for SX1276/SX1278 (RFM95/RFM96/RFM98)
//! transceivers in FSK packet mode.
//!
//! The crate turns a capcode, a function code and a short text into a standard POCSAG
//! alphanumeric transmission and streams it through the radio's 64-byte FIFO:
//! - [`bch`]: BCH(31,21) check bits and even parity for 32-bit codewords
//! - [`encoding`]: batch layout, 7-bit text packing and over-the-air byte packing
//! - [`radio`]: the register interface, an `embedded-hal` SPI implementation and bring-up
//! - [`driver`]: the transmit sequencer with bounded, abortable waits
//! - [`wait`]: polling, timeout and abort helpers
//!
//! ## Crate features
//! | Feature              | Description |
//! |----------------------|-------------|
//! | `std`                | Disables `#![no_std]` |
//! | `isr-abort` (default)| `IsrAbortFlag`, an abort signal behind `critical_section` that can be raised from an ISR |
//! | `defmt-0-3`          | Uses `defmt` logging |
//! | `log`                | Uses `log` logging |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pocsag_tx::driver::{PagerDriver, TransmitConfig};
//! use pocsag_tx::radio::{RadioConfig, Sx127x, hard_reset};
//!
//! hard_reset(&mut reset_pin, &mut delay, 1_000)?;
//! let radio_config = RadioConfig::default();
//! let mut pager = PagerDriver::new(
//!     Sx127x::new(spi_device),
//!     delay,
//!     TransmitConfig::for_radio(&radio_config),
//! );
//! pager.init(&radio_config)?;
//!
//! let report = pager.send(1_000_003, 0, "HELLO")?;
//! ```
//!
//! ## Integration Notes
//!
//! - Timing is handled by the radio; the host only has to refill the FIFO before it
//!   runs dry, which at 1200 bit/s leaves about 200 ms per refill
//! - A transmission blocks for roughly 1.7 s (one batch) to 2.1 s (two batches)
//! - Texts longer than 39 characters are truncated and reported as a warning
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

mod fmt;

#[cfg(feature = "isr-abort")]
pub use critical_section;

pub use heapless;

pub mod bch;
pub mod consts;
pub mod driver;
pub mod encoding;
pub mod error;
pub mod radio;
pub mod wait;

pub use driver::{PagerDriver, SendReport, TransmitConfig, TxMode};
pub use encoding::{Transmission, build_transmission};
pub use error::{EncodeError, Error, Warning};
pub use radio::{RadioConfig, RegisterInterface, Sx127x};
