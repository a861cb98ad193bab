//! Bounded polling and abort utilities for the transmit sequencer.
//!
//! The radio reports progress only through status flags, so the sequencer has
//! to poll. Every wait here is bounded: it gives up after a poll budget derived
//! from a timeout, and it checks an [`AbortSignal`] between polls so an
//! operator can cancel a page that is stuck.
//!
//! Contains:
//! - [`block_until`]: blocking poll loop over an `nb` operation with a delay between polls
//! - [`PollPolicy`], [`poll_budget`]: timeout to poll-count conversion
//! - [`airtime_ms`]: on-air time of a packet, for sizing timeouts
//! - [`AbortSignal`], [`NoAbort`]: cancellation hook
//! - `IsrAbortFlag` and `pocsag_abort_flag!()`: interrupt-safe abort flag
//! (feature `isr-abort`)
//!
//! Typical on-air times at 1200 bit/s with a 180 byte preamble:
//!
//! | Payload | Batches | Airtime  |
//! |---------|---------|----------|
//! |    68 B |       1 | 1 654 ms |
//! |   136 B |       2 | 2 107 ms |

use core::fmt;

mod delay;
pub use delay::*;

#[cfg(feature = "isr-abort")]
mod isr;
#[cfg(feature = "isr-abort")]
pub use isr::*;

#[cfg(feature = "isr-abort")]
mod macros;

/// Microseconds per millisecond.
pub const MICROSECONDS_PER_MILLISECOND: u32 = 1_000;
/// Bits per FIFO byte.
pub const BITS_PER_BYTE: u32 = 8;

/// The status condition a wait is blocked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum WaitTarget {
    /// FIFO level dropped to the refill threshold.
    FifoRefill,
    /// The radio finished sending the packet.
    PacketSent,
}

impl fmt::Display for WaitTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitTarget::FifoRefill => f.write_str("FIFO refill threshold"),
            WaitTarget::PacketSent => f.write_str("packet sent"),
        }
    }
}

/// Why a bounded wait ended without a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum WaitError<E> {
    /// The poll budget ran out.
    TimedOut,
    /// The abort signal was raised.
    Aborted,
    /// The polled operation failed.
    Other(E),
}

/// How long and how often to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct PollPolicy {
    /// Delay between two polls, in microseconds.
    pub interval_us: u32,
    /// Maximum number of polls. At least one poll is always made.
    pub max_polls: u32,
}

impl PollPolicy {
    /// Builds a policy that polls every `interval_us` for about `timeout_ms`.
    pub const fn from_timeout_ms(timeout_ms: u32, interval_us: u32) -> Self {
        Self {
            interval_us,
            max_polls: poll_budget(timeout_ms, interval_us),
        }
    }
}

/// Number of polls spaced `interval_us` apart that fit in `timeout_ms`.
///
/// Rounds up and never returns less than 1. A zero interval yields one poll
/// per microsecond of timeout.
pub const fn poll_budget(timeout_ms: u32, interval_us: u32) -> u32 {
    let timeout_us = timeout_ms as u64 * MICROSECONDS_PER_MILLISECOND as u64;
    let interval = if interval_us == 0 { 1 } else { interval_us as u64 };
    let polls = timeout_us.div_ceil(interval);
    if polls == 0 {
        1
    } else if polls > u32::MAX as u64 {
        u32::MAX
    } else {
        polls as u32
    }
}

/// On-air time of a packet, in milliseconds, rounded up.
///
/// # Arguments
/// - `bitrate`: bits per second (e.g. 1200)
/// - `preamble_len`: preamble length in bytes
/// - `payload_len`: payload length in bytes
pub fn airtime_ms(bitrate: u32, preamble_len: u16, payload_len: usize) -> u32 {
    let bits = (u64::from(preamble_len) + payload_len as u64) * u64::from(BITS_PER_BYTE);
    let ms = (bits * 1_000).div_ceil(u64::from(bitrate.max(1)));
    u32::try_from(ms).unwrap_or(u32::MAX)
}

/// A cancellation hook checked between polls.
pub trait AbortSignal {
    /// Returns `true` once the current wait should be abandoned.
    fn is_aborted(&self) -> bool;
}

/// An [`AbortSignal`] that is never raised.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoAbort;

impl AbortSignal for NoAbort {
    fn is_aborted(&self) -> bool {
        false
    }
}

impl<T: AbortSignal + ?Sized> AbortSignal for &T {
    fn is_aborted(&self) -> bool {
        (**self).is_aborted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_budget_rounds_up() {
        assert_eq!(poll_budget(10, 1_000), 10);
        assert_eq!(poll_budget(10, 3_000), 4);
        assert_eq!(poll_budget(0, 1_000), 1);
        assert_eq!(poll_budget(1, 0), 1_000);
        assert_eq!(poll_budget(u32::MAX, 1), u32::MAX);
    }

    #[test]
    fn test_policy_from_timeout() {
        let policy = PollPolicy::from_timeout_ms(2_000, 500);
        assert_eq!(policy.interval_us, 500);
        assert_eq!(policy.max_polls, 4_000);
    }

    #[test]
    fn test_airtime_of_one_and_two_batches() {
        assert_eq!(airtime_ms(1200, 180, 68), 1654);
        assert_eq!(airtime_ms(1200, 180, 136), 2107);
        assert_eq!(airtime_ms(512, 0, 64), 1000);
    }

    #[test]
    fn test_wait_target_display() {
        assert_eq!(WaitTarget::PacketSent.to_string(), "packet sent");
        assert_eq!(WaitTarget::FifoRefill.to_string(), "FIFO refill threshold");
    }

    #[test]
    fn test_no_abort_never_fires() {
        let signal = NoAbort;
        assert!(!signal.is_aborted());
        assert!(!(&signal).is_aborted());
    }
}
