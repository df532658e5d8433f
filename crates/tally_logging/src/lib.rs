#![deny(missing_docs)]
//! Shared logging utilities for the sharetally workspace.
//!
//! This crate provides the `tally_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger.

use std::cell::Cell;

thread_local! {
    /// Thread-local storage for the post id the current request operates on.
    static CURRENT_POST: Cell<u64> = const { Cell::new(0) };
}

/// Sets the post id for the current request thread.
/// This should be called by the boundary layer when a request is dispatched.
pub fn set_current_post(post_id: u64) {
    CURRENT_POST.with(|v| v.set(post_id));
}

/// Retrieves the post id for the current request thread.
/// Returns 0 if no post id has been set.
pub fn get_current_post() -> u64 {
    CURRENT_POST.with(|v| v.get())
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! tally_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! tally_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! tally_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! tally_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! tally_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
