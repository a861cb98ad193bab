use super::{AbortSignal, PollPolicy, WaitError};
use embedded_hal::delay::DelayNs;

/// Repeatedly calls a non-blocking operation until it completes, fails, runs out
/// of polls or is aborted.
///
/// This replaces an open-ended busy loop with one that is bounded by a
/// [`PollPolicy`]. The abort signal is checked before every poll and the
/// delay provider sleeps `interval_us` between polls.
///
/// # Arguments
/// - `delay`: A delay provider implementing `DelayNs`, typically from the HAL.
/// - `abort`: Checked before each poll; see [`AbortSignal`].
/// - `policy`: Poll interval and budget.
/// - `poll`: The operation; `nb::Error::WouldBlock` means "not yet".
///
/// # Returns
/// - `Ok(T)` with the operation's value
/// - `Err(WaitError::TimedOut)` once `policy.max_polls` polls returned `WouldBlock`
/// - `Err(WaitError::Aborted)` if the abort signal was raised
/// - `Err(WaitError::Other(e))` if the operation failed
///
/// # Example
/// ```rust
/// use embedded_hal::delay::DelayNs;
/// use pocsag_tx::wait::{block_until, NoAbort, PollPolicy};
///
/// struct Spin;
/// impl DelayNs for Spin {
///     fn delay_ns(&mut self, _ns: u32) {}
/// }
///
/// let mut remaining = 3;
/// let result: Result<(), _> = block_until(
///     &mut Spin,
///     &NoAbort,
///     PollPolicy { interval_us: 100, max_polls: 10 },
///     || {
///         remaining -= 1;
///         if remaining == 0 { Ok(()) } else { Err(nb::Error::<()>::WouldBlock) }
///     },
/// );
/// assert!(result.is_ok());
/// ```
pub fn block_until<T, E, D, A, F>(
    delay: &mut D,
    abort: &A,
    policy: PollPolicy,
    mut poll: F,
) -> Result<T, WaitError<E>>
where
    D: DelayNs,
    A: AbortSignal + ?Sized,
    F: FnMut() -> nb::Result<T, E>,
{
    let polls = policy.max_polls.max(1);
    for attempt in 1..=polls {
        if abort.is_aborted() {
            return Err(WaitError::Aborted);
        }
        match poll() {
            Ok(value) => return Ok(value),
            Err(nb::Error::Other(e)) => return Err(WaitError::Other(e)),
            Err(nb::Error::WouldBlock) => {
                if attempt < polls {
                    delay.delay_us(policy.interval_us);
                }
            }
        }
    }
    Err(WaitError::TimedOut)
}
