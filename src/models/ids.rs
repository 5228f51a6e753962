//! Index handles into the family-tree arena

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to an individual stored in a `FamilyTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IndividualId(pub(crate) usize);

/// Handle to a family stored in a `FamilyTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FamilyId(pub(crate) usize);

impl IndividualId {
    /// Position of the individual in the arena
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl FamilyId {
    /// Position of the family in the arena
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for IndividualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for FamilyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F#{}", self.0)
    }
}
