#![deny(missing_docs)]
//! Shared logging utilities for the book finder workspace.
//!
//! This crate provides the `finder_*` logging macros used by the engine and
//! the terminal app, plus a minimal test initializer for the global logger.
//! The macros expand to the `log` facade re-exported from here, so callers
//! do not need their own `log` dependency.

#[doc(hidden)]
pub use log;

/// Target used for every record emitted through the `finder_*` macros.
pub const LOG_TARGET: &str = "book_finder";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! finder_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! finder_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! finder_info {
    ($($arg:tt)*) => {{
        $crate::log::info!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! finder_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! finder_error {
    ($($arg:tt)*) => {{
        $crate::log::error!(target: $crate::LOG_TARGET, $($arg)*);
    }};
}

/// Level used by [`initialize_for_tests`]: debug in debug builds, info otherwise.
pub fn test_level() -> log::LevelFilter {
    if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized, so
/// every test may call it.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        test_level(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_twice_is_harmless() {
        initialize_for_tests();
        initialize_for_tests();
        finder_info!("logger initialized for {}", "tests");
        finder_trace!("trace records are filtered at {:?}", test_level());
    }
}
