//! Test utilities
//!
//! This module provides tree fixtures shared by unit tests, integration
//! tests and the demo binary.


pub use fixtures::{TreeFixture, birth_at, random_tree, sample_tree};
