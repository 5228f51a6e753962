//! Duplicate-candidate pairs

use crate::models::ids::IndividualId;
use serde::Serialize;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Two individuals that may be the same person, with their similarity score
///
/// Equality and hashing ignore the order of the pair.
#[derive(Debug, Clone, Copy)]
pub struct DuplicateIndividual {
    /// First individual of the pair
    pub individual_a: IndividualId,
    /// Second individual of the pair
    pub individual_b: IndividualId,
    /// Additive similarity score, higher is more likely a duplicate
    pub score: i32,
}

impl DuplicateIndividual {
    /// Create a scored pair
    #[must_use]
    pub const fn new(individual_a: IndividualId, individual_b: IndividualId, score: i32) -> Self {
        Self {
            individual_a,
            individual_b,
            score,
        }
    }

    /// The pair in ascending handle order
    #[must_use]
    pub fn ordered_pair(&self) -> (IndividualId, IndividualId) {
        if self.individual_a <= self.individual_b {
            (self.individual_a, self.individual_b)
        } else {
            (self.individual_b, self.individual_a)
        }
    }

    /// Whether `individual` is one side of the pair
    #[must_use]
    pub fn contains(&self, individual: IndividualId) -> bool {
        self.individual_a == individual || self.individual_b == individual
    }
}

impl PartialEq for DuplicateIndividual {
    fn eq(&self, other: &Self) -> bool {
        self.ordered_pair() == other.ordered_pair()
    }
}

impl Eq for DuplicateIndividual {}

impl Hash for DuplicateIndividual {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ordered_pair().hash(state);
    }
}

/// Compares by score only, for ranking candidate lists
pub fn compare_by_score(a: &DuplicateIndividual, b: &DuplicateIndividual) -> Ordering {
    a.score.cmp(&b.score)
}

/// Exportable view of a duplicate pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateRecord {
    /// Identifier of the first individual
    pub id_a: String,
    /// Name of the first individual
    pub name_a: String,
    /// Identifier of the second individual
    pub id_b: String,
    /// Name of the second individual
    pub name_b: String,
    /// Similarity score
    pub score: i32,
}
