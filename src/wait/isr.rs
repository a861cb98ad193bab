use super::AbortSignal;
use core::cell::Cell;
use core::fmt;
use critical_section::Mutex;

/// An abort flag that can be raised from an interrupt handler.
///
/// The flag lives behind a `critical_section` mutex, so it can be a `static`
/// shared between the main loop (which transmits) and an ISR (e.g. an operator
/// "cancel" button). Pass a `&'static IsrAbortFlag` to
/// [`PagerDriver::with_abort`](crate::driver::PagerDriver::with_abort).
///
/// # Example
/// ```rust
/// use pocsag_tx::wait::{AbortSignal, IsrAbortFlag};
///
/// static ABORT: IsrAbortFlag = IsrAbortFlag::new();
///
/// // In the button interrupt:
/// ABORT.raise();
///
/// assert!(ABORT.is_aborted());
/// assert!(ABORT.take());
/// assert!(!ABORT.is_aborted());
/// ```
pub struct IsrAbortFlag {
    raised: Mutex<Cell<bool>>,
}

impl IsrAbortFlag {
    /// Creates a lowered flag. Usable in `static` initialisers.
    pub const fn new() -> Self {
        Self {
            raised: Mutex::new(Cell::new(false)),
        }
    }

    /// Raises the flag. Safe to call from interrupt context.
    pub fn raise(&self) {
        critical_section::with(|cs| self.raised.borrow(cs).set(true));
    }

    /// Lowers the flag.
    pub fn clear(&self) {
        critical_section::with(|cs| self.raised.borrow(cs).set(false));
    }

    /// Lowers the flag and returns whether it was raised.
    pub fn take(&self) -> bool {
        critical_section::with(|cs| self.raised.borrow(cs).replace(false))
    }
}

impl Default for IsrAbortFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IsrAbortFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IsrAbortFlag")
            .field("raised", &self.is_aborted())
            .finish()
    }
}

impl AbortSignal for IsrAbortFlag {
    fn is_aborted(&self) -> bool {
        critical_section::with(|cs| self.raised.borrow(cs).get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static FLAG: IsrAbortFlag = IsrAbortFlag::new();

    #[test]
    fn test_flag_raise_and_clear() {
        let flag = IsrAbortFlag::default();
        assert!(!flag.is_aborted());
        flag.raise();
        assert!(flag.is_aborted());
        flag.clear();
        assert!(!flag.is_aborted());
    }

    #[test]
    fn test_take_lowers_flag() {
        FLAG.raise();
        assert!(FLAG.take());
        assert!(!FLAG.take());
    }

    #[test]
    fn test_static_reference_is_an_abort_signal() {
        fn check<A: AbortSignal>(signal: A) -> bool {
            signal.is_aborted()
        }
        let flag = IsrAbortFlag::new();
        assert!(!check(&flag));
        flag.raise();
        assert!(check(&flag));
    }
}
