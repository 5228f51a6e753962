//! Family entity model
//!
//! A family links up to two spouses with their children. Each child keeps a
//! `ParentalRelationship` back to the family, flagging whether the husband
//! and wife are its natural parents.

use crate::models::fact::{Fact, FactType};
use crate::models::fact_date::FactDate;
use crate::models::ids::{FamilyId, IndividualId};
use crate::models::types::MaritalStatus;
use smallvec::SmallVec;
use std::sync::LazyLock;

static UNKNOWN_DATE: LazyLock<FactDate> = LazyLock::new(FactDate::unknown);

/// Edge from a child to a family it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentalRelationship {
    /// Family the child belongs to
    pub family: FamilyId,
    /// Whether the husband is the child's natural father
    pub natural_father: bool,
    /// Whether the wife is the child's natural mother
    pub natural_mother: bool,
}

/// A couple and their children
#[derive(Debug, Clone)]
pub struct Family {
    id: String,
    pub(crate) husband: Option<IndividualId>,
    pub(crate) wife: Option<IndividualId>,
    pub(crate) children: Vec<IndividualId>,
    facts: Vec<Fact>,
    /// Recorded marital status of the couple
    pub marital_status: MaritalStatus,
    solo: bool,
}

impl Family {
    pub(crate) fn new(id: String, facts: Vec<Fact>, marital_status: MaritalStatus) -> Self {
        Self {
            id,
            husband: None,
            wife: None,
            children: Vec::new(),
            facts,
            marital_status,
            solo: false,
        }
    }

    /// Singleton family holding one otherwise unconnected individual
    pub(crate) fn solo(id: String, member: IndividualId, is_male: bool) -> Self {
        let mut family = Self::new(id, Vec::new(), MaritalStatus::Single);
        if is_male {
            family.husband = Some(member);
        } else {
            family.wife = Some(member);
        }
        family.solo = true;
        family
    }

    /// Identifier from the source file, or `SF<n>` for solo families
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Husband, if recorded
    #[must_use]
    pub const fn husband(&self) -> Option<IndividualId> {
        self.husband
    }

    /// Wife, if recorded
    #[must_use]
    pub const fn wife(&self) -> Option<IndividualId> {
        self.wife
    }

    /// Children in recorded order
    #[must_use]
    pub fn children(&self) -> &[IndividualId] {
        &self.children
    }

    /// Family facts such as marriage
    #[must_use]
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// Whether this family was created to hold a lone individual
    #[must_use]
    pub const fn is_solo(&self) -> bool {
        self.solo
    }

    /// Whether the couple are recorded as married
    #[must_use]
    pub fn is_married(&self) -> bool {
        self.marital_status == MaritalStatus::Married
    }

    /// The other spouse, if `individual` is one of the couple
    #[must_use]
    pub fn spouse_of(&self, individual: IndividualId) -> Option<IndividualId> {
        if self.husband == Some(individual) {
            self.wife
        } else if self.wife == Some(individual) {
            self.husband
        } else {
            None
        }
    }

    /// Husband, wife and children
    #[must_use]
    pub fn members(&self) -> SmallVec<[IndividualId; 8]> {
        self.husband
            .into_iter()
            .chain(self.wife)
            .chain(self.children.iter().copied())
            .collect()
    }

    /// Preferred marriage fact, if recorded
    #[must_use]
    pub fn marriage_fact(&self) -> Option<&Fact> {
        let mut marriages = self
            .facts
            .iter()
            .filter(|f| f.fact_type == FactType::Marriage);
        let first = marriages.next()?;
        if first.preferred {
            return Some(first);
        }
        marriages.find(|f| f.preferred).or(Some(first))
    }

    /// Marriage date, unknown if not recorded
    #[must_use]
    pub fn marriage_date(&self) -> &FactDate {
        self.marriage_fact().map_or(&*UNKNOWN_DATE, |f| &f.date)
    }
}
