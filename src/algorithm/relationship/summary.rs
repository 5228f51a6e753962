//! Relationship class counts

use crate::graph::FamilyTree;
use crate::models::types::RelationType;
use serde::Serialize;
use std::fmt;

/// Number of individuals in each relationship class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RelationSummary {
    pub direct: usize,
    pub descendant: usize,
    pub blood: usize,
    pub married_to_blood: usize,
    pub marriage: usize,
    pub linked: usize,
    pub unknown: usize,
    pub unset: usize,
}

impl RelationSummary {
    /// Count the current classification of every individual
    #[must_use]
    pub fn from_tree(tree: &FamilyTree) -> Self {
        let mut summary = Self::default();
        for (_, individual) in tree.individuals() {
            summary.add(individual.relation_type());
        }
        summary
    }

    fn add(&mut self, relation: RelationType) {
        let slot = match relation {
            RelationType::Direct => &mut self.direct,
            RelationType::Descendant => &mut self.descendant,
            RelationType::Blood => &mut self.blood,
            RelationType::MarriedToDirectOrBlood => &mut self.married_to_blood,
            RelationType::Marriage => &mut self.marriage,
            RelationType::Linked => &mut self.linked,
            RelationType::Unknown => &mut self.unknown,
            RelationType::Unset => &mut self.unset,
        };
        *slot += 1;
    }

    /// Total individuals counted
    #[must_use]
    pub const fn total(&self) -> usize {
        self.direct
            + self.descendant
            + self.blood
            + self.married_to_blood
            + self.marriage
            + self.linked
            + self.unknown
            + self.unset
    }

    /// Count for one class
    #[must_use]
    pub const fn count(&self, relation: RelationType) -> usize {
        match relation {
            RelationType::Direct => self.direct,
            RelationType::Descendant => self.descendant,
            RelationType::Blood => self.blood,
            RelationType::MarriedToDirectOrBlood => self.married_to_blood,
            RelationType::Marriage => self.marriage,
            RelationType::Linked => self.linked,
            RelationType::Unknown => self.unknown,
            RelationType::Unset => self.unset,
        }
    }
}

impl fmt::Display for RelationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Direct Ancestors: {}", self.direct)?;
        writeln!(f, "Descendants: {}", self.descendant)?;
        writeln!(f, "Blood Relations: {}", self.blood)?;
        writeln!(f, "Married to Blood or Direct Relation: {}", self.married_to_blood)?;
        writeln!(f, "Related by Marriage: {}", self.marriage)?;
        writeln!(f, "Linked through Marriages: {}", self.linked)?;
        write!(f, "Unknown relation: {}", self.unknown)?;
        if self.unset > 0 {
            write!(f, "\nFailed to set relationship: {}", self.unset)?;
        }
        Ok(())
    }
}
