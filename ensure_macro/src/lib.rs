/// Early-returns `Err($err)` when `$cond` doesn't hold
///
/// Modelled on the `ensure!` macro in dtolnay's anyhow crate, but returns the caller's own
/// error type instead of `anyhow::Error`, so it can be used with `thiserror` enums.
///
/// ```
/// # use ensure_macro::ensure;
/// #[derive(Debug, PartialEq)]
/// enum HeightError {
///     AboveTip { height: u64, tip: u64 }
/// }
///
/// fn check_height(height: u64, tip: u64) -> Result<u64, HeightError> {
///     ensure!(height <= tip, HeightError::AboveTip { height, tip });
///     Ok(tip - height)
/// }
///
/// assert_eq!(check_height(10, 12), Ok(2));
/// assert_eq!(check_height(13, 12), Err(HeightError::AboveTip { height: 13, tip: 12 }));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}
