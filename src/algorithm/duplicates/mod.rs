//! Duplicate individual detection
//!
//! This module provides:
//! - Phonetic encoding and forename standardisation primitives
//! - Surname grouping to bound the number of comparisons
//! - Additive pair scoring over names, dates, places and parents
//! - A cancellable parallel scanner with progress reporting and caching

pub mod grouping;
pub mod phonetic;
pub mod scanner;
pub mod scoring;

pub use grouping::{CandidateIndex, SurnameGroup};
pub use phonetic::{DoubleMetaphoneEncoder, NameStandardiser, PhoneticEncoder, StandardisedNames};
pub use scanner::{
    CancellationToken, DuplicateReport, DuplicateScanner, ScanOutcome, ScanProgress,
};
pub use scoring::{PairScorer, is_twins};
