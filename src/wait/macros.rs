/// Declares a static [`IsrAbortFlag`](crate::wait::IsrAbortFlag) named `$name`.
///
/// The flag can be raised from an interrupt handler and handed to the driver as
/// a `&'static` abort signal.
///
/// # Example
/// ```rust
/// use pocsag_tx::pocsag_abort_flag;
/// use pocsag_tx::wait::AbortSignal;
///
/// pocsag_abort_flag!(OPERATOR_ABORT);
///
/// fn on_button_press() {
///     OPERATOR_ABORT.raise();
/// }
///
/// on_button_press();
/// assert!(OPERATOR_ABORT.is_aborted());
/// ```
#[macro_export]
macro_rules! pocsag_abort_flag {
    ( $name:ident ) => {
        pub static $name: $crate::wait::IsrAbortFlag = $crate::wait::IsrAbortFlag::new();
    };
}
