//! Relationship classification, duplicate detection and data-quality checks
//! over genealogy graphs.
//!
//! A `FamilyTree` is built once from loader records and then handed to the
//! analysis passes:
//! - `RelationshipClassifier` labels everyone relative to a root person
//! - `DuplicateScanner` scores likely duplicate individuals in parallel
//! - `DataQualityChecker` reports implausible dates and structures

pub mod algorithm;
pub mod config;
pub mod error;
pub mod graph;
pub mod models;
pub mod utils;

// Core types
pub use config::{AnalyzerConfig, ClassifierConfig, DataQualityConfig, DuplicateConfig};
pub use error::{KinshipError, Result};
pub use graph::{ChildRecord, FamilyRecord, FamilyTree, FamilyTreeBuilder};
pub use models::{
    DataError, DataErrorCategory, DataErrorGroup, DuplicateIndividual, DuplicateRecord, Fact,
    FactDate, FactLocation, FactType, Family, FamilyId, Gender, Individual, IndividualId,
    MaritalStatus, RelationType, Severity,
};

// Analysis passes
pub use algorithm::duplicates::{CancellationToken, DuplicateReport, DuplicateScanner, ScanOutcome};
pub use algorithm::quality::{DataQualityChecker, DataQualityReport};
pub use algorithm::relationship::{ClassificationReport, RelationSummary, RelationshipClassifier};

// Utility functions
pub use utils::init_logging;
