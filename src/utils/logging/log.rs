//! Logger setup and operation logging
//!
//! Log output goes through the `log` facade; binaries install `env_logger`
//! and honour `RUST_LOG`.

use std::time::Duration;

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info";

/// Install the global logger, defaulting to `info`
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging() {
    init_logging_with_filter(DEFAULT_FILTER);
}

/// Install the global logger with a fallback filter
///
/// # Arguments
/// * `filter` - Filter applied when `RUST_LOG` is not set, e.g. `"kinship=debug"`
pub fn init_logging_with_filter(filter: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp_millis()
        .try_init();
}

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `subject` - What the operation runs over
pub fn log_operation_start(operation: &str, subject: &str) {
    log::info!("{operation} {subject}");
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `items` - Number of items processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(operation: &str, items: usize, elapsed: Option<Duration>) {
    if let Some(duration) = elapsed {
        log::info!("Successfully {operation} {items} items in {duration:.2?}");
    } else {
        log::info!("Successfully {operation} {items} items");
    }
}
