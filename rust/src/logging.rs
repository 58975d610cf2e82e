//! Logging macros with verbosity level control.
//!
//! Messages go through the `log` facade under the `flagstats` target; the
//! library never installs a logger. Verbosity levels:
//! - 0: SILENT (nothing)
//! - 1: RUNS (computation mode and dimension range of each engine call)
//! - 2: DEBUG (engine internals: complex sizes, ranks)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_RUNS: u8 = 1;
pub const VERBOSITY_DEBUG: u8 = 2;

/// Log target for every message emitted by this crate.
pub const LOG_TARGET: &str = "flagstats";

/// Log at RUNS level (verbosity >= 1), as `info`.
///
/// Used for: which computation mode and dimension range is about to run.
#[macro_export]
macro_rules! log_runs {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_RUNS {
            log::info!(target: $crate::logging::LOG_TARGET, $($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 2), as `debug`.
///
/// Used for: simplex counts per dimension, boundary ranks.
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            log::debug!(target: $crate::logging::LOG_TARGET, $($arg)*);
        }
    };
}
