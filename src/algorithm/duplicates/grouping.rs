//! Surname grouping for duplicate detection
//!
//! Individuals are bucketed by the phonetic key of their surname, so only
//! people with same-sounding surnames are ever compared. The name keys each
//! comparison needs are computed once here, before any worker starts.

use crate::algorithm::duplicates::phonetic::{NameStandardiser, PhoneticEncoder};
use crate::graph::FamilyTree;
use crate::models::ids::IndividualId;
use itertools::Itertools;
use log::debug;

/// Precomputed name keys for one individual
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameKeys {
    /// Phonetic key of the surname
    pub surname: String,
    /// Phonetic key of the first forename
    pub forename: String,
    /// Standardised first forename
    pub standardised: String,
}

/// Individuals sharing a surname phonetic key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurnameGroup {
    /// Shared phonetic key
    pub key: String,
    /// Members in load order
    pub members: Vec<IndividualId>,
}

impl SurnameGroup {
    /// Number of unordered pairs in the group
    #[must_use]
    pub fn comparisons(&self) -> u64 {
        let n = self.members.len() as u64;
        n * n.saturating_sub(1) / 2
    }
}

/// Name keys for every individual plus the surname groups built from them
#[derive(Debug, Clone, Default)]
pub struct CandidateIndex {
    keys: Vec<Option<NameKeys>>,
    groups: Vec<SurnameGroup>,
}

impl CandidateIndex {
    /// Compute keys and group everyone with a usable name
    ///
    /// Individuals with a placeholder surname or forename are left out.
    /// Groups with a single member are dropped since they hold no pairs.
    /// Groups are ordered by key so runs are reproducible.
    #[must_use]
    pub fn build(
        tree: &FamilyTree,
        encoder: &dyn PhoneticEncoder,
        standardiser: &dyn NameStandardiser,
    ) -> Self {
        let keys = tree
            .individuals()
            .map(|(_, individual)| {
                if individual.has_unknown_name() {
                    return None;
                }
                let surname = encoder.encode(individual.surname());
                if surname.is_empty() {
                    return None;
                }
                Some(NameKeys {
                    surname,
                    forename: encoder.encode(individual.forename()),
                    standardised: standardiser
                        .standardise(individual.forename(), individual.gender),
                })
            })
            .collect_vec();

        let groups = keys
            .iter()
            .enumerate()
            .filter_map(|(index, key)| {
                key.as_ref()
                    .map(|key| (key.surname.clone(), IndividualId(index)))
            })
            .into_group_map()
            .into_iter()
            .filter(|(_, members)| members.len() > 1)
            .map(|(key, members)| SurnameGroup { key, members })
            .sorted_by(|a, b| a.key.cmp(&b.key))
            .collect_vec();

        debug!(
            "Grouped {} named individuals into {} surname groups",
            keys.iter().flatten().count(),
            groups.len()
        );
        Self { keys, groups }
    }

    /// Name keys of an individual, if it has a usable name
    #[must_use]
    pub fn keys(&self, id: IndividualId) -> Option<&NameKeys> {
        self.keys.get(id.index()).and_then(Option::as_ref)
    }

    /// Surname groups with at least two members
    #[must_use]
    pub fn groups(&self) -> &[SurnameGroup] {
        &self.groups
    }

    /// Total pairs across all groups
    #[must_use]
    pub fn total_comparisons(&self) -> u64 {
        self.groups.iter().map(SurnameGroup::comparisons).sum()
    }
}
