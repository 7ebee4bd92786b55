//! Log macros gated by a per-module `ENABLE_LOGS` flag.
//!
//! A module opts in by declaring the flag and calling the macros through the
//! crate root:
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//!
//! crate::log_info!("slide {} entered", 3);
//! ```
//! Chatty modules (per-transition analytics) ship with the flag off.

/// `log::info!` when the calling module's `ENABLE_LOGS` is true.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// `log::warn!` when the calling module's `ENABLE_LOGS` is true.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// `log::error!` when the calling module's `ENABLE_LOGS` is true.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}
