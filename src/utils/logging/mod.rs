//! Logging utilities for output and progress tracking
//!
//! This module provides logger setup, operation logging and progress bars.

pub mod log;
pub mod progress;

pub use log::{init_logging, init_logging_with_filter, log_operation_complete, log_operation_start};
pub use progress::{create_main_progress_bar, create_spinner, finish_and_clear, finish_progress_bar};
