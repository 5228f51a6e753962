//! Relationship classification relative to a root person
//!
//! This module provides:
//! - The multi-phase classifier assigning relation types and Ahnentafel numbers
//! - Kinship descriptions such as `2nd cousin once removed`
//! - Lineage queries (ancestors, descendants, immediate family, components)
//! - Per-class summary counts

pub mod classifier;
pub mod description;
pub mod lineage;
pub mod summary;

pub use classifier::{AncestorConflict, ClassificationReport, RelationshipClassifier};
pub use description::{direct_description, kinship};
pub use lineage::{all_relations, ancestors, descendants, immediate_family};
pub use summary::RelationSummary;
