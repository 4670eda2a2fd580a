#[doc(hidden)]
pub use log;

/// Panics in debug builds, logs an error in release builds.
///
/// Meant for internal bookkeeping that went out of sync, where crashing a
/// release build would be worse than rendering one odd frame.
#[macro_export]
macro_rules! debug_panic {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            panic!($($arg)*);
        } else {
            $crate::log::error!($($arg)*);
        }
    };
}

/// Returns the value if it's finite, otherwise the fallback.
#[inline]
pub fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}
