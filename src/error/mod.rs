//! Error handling for the kinship analyser.
//!
//! Only structural problems surface here. Per-record anomalies found while
//! classifying, scoring or checking a tree are collected as diagnostics instead.

use thiserror::Error;

/// Specialized error type for tree construction and analysis
#[derive(Debug, Error)]
pub enum KinshipError {
    /// The tree holds no individuals, so nothing can be classified
    #[error("Family tree is empty")]
    EmptyTree,
    /// The requested root individual does not exist in the tree
    #[error("Root individual not found: {0}")]
    RootNotFound(String),
    /// Two records share the same identifier
    #[error("Duplicate {kind} ID: {id}")]
    DuplicateId {
        /// Record kind, `individual` or `family`
        kind: &'static str,
        /// The repeated identifier
        id: String,
    },
    /// A family refers to an individual that was never added
    #[error("Family {family} refers to unknown individual {individual}")]
    DanglingReference {
        /// Family holding the reference
        family: String,
        /// Identifier that could not be resolved
        individual: String,
    },
    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// JSON (de)serialisation failure for configuration or reports
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl KinshipError {
    /// Create a duplicate-ID error for an individual record
    pub fn duplicate_individual(id: impl Into<String>) -> Self {
        Self::DuplicateId {
            kind: "individual",
            id: id.into(),
        }
    }

    /// Create a duplicate-ID error for a family record
    pub fn duplicate_family(id: impl Into<String>) -> Self {
        Self::DuplicateId {
            kind: "family",
            id: id.into(),
        }
    }
}

/// Result type for kinship operations
pub type Result<T> = std::result::Result<T, KinshipError>;
