//! Family tree graph context
//!
//! The tree owns every individual and family in two arenas. Families refer
//! to individuals, and individuals to families, through index handles, so
//! the spouse/parent/child cycles never need shared ownership.

use crate::models::fact::Fact;
use crate::models::family::{Family, ParentalRelationship};
use crate::models::ids::{FamilyId, IndividualId};
use crate::models::individual::Individual;
use itertools::Itertools;
use log::{info, warn};
use rustc_hash::{FxHashMap, FxHashSet};

/// Arena of individuals and families with lookups by source identifier
#[derive(Debug, Clone, Default)]
pub struct FamilyTree {
    individuals: Vec<Individual>,
    families: Vec<Family>,
    individual_lookup: FxHashMap<String, IndividualId>,
    family_lookup: FxHashMap<String, FamilyId>,
}

impl FamilyTree {
    pub(crate) fn from_parts(
        individuals: Vec<Individual>,
        families: Vec<Family>,
        individual_lookup: FxHashMap<String, IndividualId>,
        family_lookup: FxHashMap<String, FamilyId>,
    ) -> Self {
        Self {
            individuals,
            families,
            individual_lookup,
            family_lookup,
        }
    }

    /// Number of individuals
    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Whether the tree holds no individuals
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Number of families, including solo families
    #[must_use]
    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    /// Individual behind a handle
    ///
    /// # Panics
    /// If the handle was issued by a different tree
    #[must_use]
    pub fn individual(&self, id: IndividualId) -> &Individual {
        &self.individuals[id.0]
    }

    pub(crate) fn individual_mut(&mut self, id: IndividualId) -> &mut Individual {
        &mut self.individuals[id.0]
    }

    /// Family behind a handle
    ///
    /// # Panics
    /// If the handle was issued by a different tree
    #[must_use]
    pub fn family(&self, id: FamilyId) -> &Family {
        &self.families[id.0]
    }

    /// Individuals with their handles, in load order
    pub fn individuals(&self) -> impl Iterator<Item = (IndividualId, &Individual)> {
        self.individuals
            .iter()
            .enumerate()
            .map(|(index, individual)| (IndividualId(index), individual))
    }

    /// Families with their handles, in load order
    pub fn families(&self) -> impl Iterator<Item = (FamilyId, &Family)> {
        self.families
            .iter()
            .enumerate()
            .map(|(index, family)| (FamilyId(index), family))
    }

    /// Handles of every individual
    pub fn individual_ids(&self) -> impl Iterator<Item = IndividualId> + use<> {
        (0..self.individuals.len()).map(IndividualId)
    }

    /// Handle of the individual with the given source identifier
    #[must_use]
    pub fn find_individual(&self, id: &str) -> Option<IndividualId> {
        self.individual_lookup.get(id).copied()
    }

    /// Handle of the family with the given source identifier
    #[must_use]
    pub fn find_family(&self, id: &str) -> Option<FamilyId> {
        self.family_lookup.get(id).copied()
    }

    /// Natural father and mother recorded for one parental relationship
    #[must_use]
    pub fn natural_parents(
        &self,
        relationship: &ParentalRelationship,
    ) -> (Option<IndividualId>, Option<IndividualId>) {
        let family = self.family(relationship.family);
        (
            family.husband().filter(|_| relationship.natural_father),
            family.wife().filter(|_| relationship.natural_mother),
        )
    }

    /// First recorded natural father
    #[must_use]
    pub fn natural_father(&self, id: IndividualId) -> Option<IndividualId> {
        self.individual(id)
            .parental_relationships()
            .iter()
            .find_map(|rel| self.natural_parents(rel).0)
    }

    /// First recorded natural mother
    #[must_use]
    pub fn natural_mother(&self, id: IndividualId) -> Option<IndividualId> {
        self.individual(id)
            .parental_relationships()
            .iter()
            .find_map(|rel| self.natural_parents(rel).1)
    }

    /// Personal facts followed by the facts of every family the individual
    /// is a spouse in
    #[must_use]
    pub fn all_facts(&self, id: IndividualId) -> Vec<&Fact> {
        let individual = self.individual(id);
        individual
            .facts()
            .iter()
            .chain(
                individual
                    .families_as_spouse()
                    .iter()
                    .flat_map(|family| self.family(*family).facts()),
            )
            .collect()
    }

    /// Zero-pad the numeric part of every individual identifier
    ///
    /// The width is the digit count of the number of individuals, so `I1`
    /// becomes `I01` in a tree of 10 to 99 people. Identifiers whose tail is
    /// not numeric are left alone, as is any identifier whose padded form is
    /// already taken.
    pub fn fix_ids(&mut self) {
        let width = digit_count(self.individuals.len() as u128);
        let mut taken = self
            .individuals
            .iter()
            .map(|individual| individual.id().to_string())
            .collect::<FxHashSet<_>>();
        let mut renamed = 0usize;
        for individual in &mut self.individuals {
            let id = individual.id();
            let mut chars = id.chars();
            let Some(prefix) = chars.next() else {
                continue;
            };
            let tail = chars.as_str();
            if tail.is_empty() || !tail.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            let Ok(number) = tail.parse::<u64>() else {
                continue;
            };
            let fixed = format!("{prefix}{number:0width$}");
            if fixed == id {
                continue;
            }
            if taken.contains(&fixed) {
                warn!("Not padding individual ID {id}: {fixed} is already in use");
                continue;
            }
            taken.remove(id);
            taken.insert(fixed.clone());
            individual.set_id(fixed);
            renamed += 1;
        }

        self.individual_lookup = self
            .individuals
            .iter()
            .enumerate()
            .map(|(index, individual)| (individual.id().to_string(), IndividualId(index)))
            .collect();
        if renamed > 0 {
            info!("Padded {renamed} individual IDs to width {width}");
        }
    }

    /// Give each individual without any family a solo family
    ///
    /// Returns the number of solo families created.
    pub(crate) fn add_solo_families(&mut self) -> usize {
        let lone = self
            .individuals
            .iter()
            .positions(|ind| {
                ind.families_as_spouse().is_empty() && ind.parental_relationships().is_empty()
            })
            .collect_vec();

        for (count, index) in lone.iter().enumerate() {
            let member = IndividualId(*index);
            let family_id = FamilyId(self.families.len());
            let mut id = format!("SF{}", count + 1);
            while self.family_lookup.contains_key(&id) {
                id.push('_');
            }
            let is_male = self.individuals[*index].is_male();
            self.families.push(Family::solo(id.clone(), member, is_male));
            self.family_lookup.insert(id, family_id);
            self.individuals[*index].families_as_spouse.push(family_id);
        }
        lone.len()
    }
}

/// Number of decimal digits in `value`, at least one
pub(crate) fn digit_count(value: u128) -> usize {
    let mut digits = 1;
    let mut rest = value / 10;
    while rest > 0 {
        digits += 1;
        rest /= 10;
    }
    digits
}
