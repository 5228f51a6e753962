//! Utility functions shared across the crate
//!
//! This module provides:
//! - Logger setup and operation logging
//! - Progress bars for long-running passes
//! - Tree fixtures for tests and demos

pub mod logging;
pub mod test;

pub use logging::init_logging;
