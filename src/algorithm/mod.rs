//! Analysis passes over a family tree
//!
//! This module contains the three passes that run on a built tree:
//! relationship classification relative to a root person, duplicate
//! detection, and data-quality checks.

pub mod duplicates;
pub mod quality;
pub mod relationship;
