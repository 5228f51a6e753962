//! Data-quality checks over a family tree
//!
//! This module provides:
//! - Individual rules: lifespan, parent ages, marriage dates
//! - Fact rules: dating, loader-flagged errors, duplicated facts
//! - Family rules: spouse genders, same-surname couples, sibling spacing
//! - The checker that runs them and a summary report

pub mod checker;
pub mod report;

mod facts;
mod family;
mod individual;

pub use checker::DataQualityChecker;
pub use report::DataQualityReport;
