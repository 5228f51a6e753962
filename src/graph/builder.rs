//! Family tree builder
//!
//! Loaders hand over individuals and family records that refer to each other
//! by source identifier. `FamilyTreeBuilder::build` resolves those
//! references into arena handles and wires up the back-edges.

use crate::error::{KinshipError, Result};
use crate::graph::tree::FamilyTree;
use crate::models::fact::Fact;
use crate::models::family::{Family, ParentalRelationship};
use crate::models::ids::{FamilyId, IndividualId};
use crate::models::individual::Individual;
use crate::models::types::MaritalStatus;
use log::{debug, info};
use rustc_hash::FxHashMap;

/// A child entry in a family record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildRecord {
    /// Source identifier of the child
    pub id: String,
    /// Whether the husband is the natural father
    pub natural_father: bool,
    /// Whether the wife is the natural mother
    pub natural_mother: bool,
}

impl ChildRecord {
    /// A child of both spouses by birth
    #[must_use]
    pub fn natural(id: &str) -> Self {
        Self::with_parentage(id, true, true)
    }

    /// A child with explicit natural-parent flags, e.g. step or adopted
    #[must_use]
    pub fn with_parentage(id: &str, natural_father: bool, natural_mother: bool) -> Self {
        Self {
            id: id.to_string(),
            natural_father,
            natural_mother,
        }
    }
}

/// A family as delivered by a loader, before references are resolved
#[derive(Debug, Clone, Default)]
pub struct FamilyRecord {
    /// Source identifier of the family
    pub id: String,
    /// Source identifier of the husband
    pub husband: Option<String>,
    /// Source identifier of the wife
    pub wife: Option<String>,
    /// Children in recorded order
    pub children: Vec<ChildRecord>,
    /// Family facts such as marriage
    pub facts: Vec<Fact>,
    /// Recorded marital status
    pub marital_status: MaritalStatus,
}

impl FamilyRecord {
    /// Create an empty family record
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Self::default()
        }
    }

    /// Set the husband
    #[must_use]
    pub fn with_husband(mut self, id: &str) -> Self {
        self.husband = Some(id.to_string());
        self
    }

    /// Set the wife
    #[must_use]
    pub fn with_wife(mut self, id: &str) -> Self {
        self.wife = Some(id.to_string());
        self
    }

    /// Add a natural child of both spouses
    #[must_use]
    pub fn with_child(mut self, id: &str) -> Self {
        self.children.push(ChildRecord::natural(id));
        self
    }

    /// Add a child with explicit parentage flags
    #[must_use]
    pub fn with_child_record(mut self, child: ChildRecord) -> Self {
        self.children.push(child);
        self
    }

    /// Add a family fact
    #[must_use]
    pub fn with_fact(mut self, fact: Fact) -> Self {
        self.facts.push(fact);
        self
    }

    /// Set the marital status
    #[must_use]
    pub fn with_marital_status(mut self, status: MaritalStatus) -> Self {
        self.marital_status = status;
        self
    }
}

/// Collects records and builds a linked `FamilyTree`
#[derive(Debug, Default)]
pub struct FamilyTreeBuilder {
    individuals: Vec<Individual>,
    families: Vec<FamilyRecord>,
}

impl FamilyTreeBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an individual
    pub fn add_individual(&mut self, individual: Individual) -> &mut Self {
        self.individuals.push(individual);
        self
    }

    /// Add a family record
    pub fn add_family(&mut self, family: FamilyRecord) -> &mut Self {
        self.families.push(family);
        self
    }

    /// Resolve references and build the tree
    ///
    /// Individuals that end up in no family are given a solo family so every
    /// individual has at least one family membership.
    ///
    /// # Errors
    /// * `DuplicateId` if two individuals or two families share an identifier
    /// * `DanglingReference` if a family names an individual never added
    pub fn build(self) -> Result<FamilyTree> {
        let mut individual_lookup =
            FxHashMap::with_capacity_and_hasher(self.individuals.len(), Default::default());
        for (index, individual) in self.individuals.iter().enumerate() {
            if individual_lookup
                .insert(individual.id().to_string(), IndividualId(index))
                .is_some()
            {
                return Err(KinshipError::duplicate_individual(individual.id()));
            }
        }

        let mut individuals = self.individuals;
        let mut families = Vec::with_capacity(self.families.len());
        let mut family_lookup =
            FxHashMap::with_capacity_and_hasher(self.families.len(), Default::default());

        for (index, record) in self.families.into_iter().enumerate() {
            let family_id = FamilyId(index);
            if family_lookup.insert(record.id.clone(), family_id).is_some() {
                return Err(KinshipError::duplicate_family(record.id));
            }

            let resolve = |id: &str| {
                individual_lookup
                    .get(id)
                    .copied()
                    .ok_or_else(|| KinshipError::DanglingReference {
                        family: record.id.clone(),
                        individual: id.to_string(),
                    })
            };

            let husband = record.husband.as_deref().map(resolve).transpose()?;
            let wife = record.wife.as_deref().map(resolve).transpose()?;
            let mut children = Vec::with_capacity(record.children.len());
            let mut edges = Vec::with_capacity(record.children.len());
            for child in &record.children {
                let child_id = resolve(&child.id)?;
                children.push(child_id);
                edges.push((child_id, child.natural_father, child.natural_mother));
            }

            let facts = record
                .facts
                .into_iter()
                .map(|mut fact| {
                    fact.family_id = Some(record.id.clone());
                    fact
                })
                .collect();
            let mut family = Family::new(record.id.clone(), facts, record.marital_status);
            family.husband = husband;
            family.wife = wife;
            family.children = children;

            for spouse in [husband, wife].into_iter().flatten() {
                let spouse_families = &mut individuals[spouse.0].families_as_spouse;
                if !spouse_families.contains(&family_id) {
                    spouse_families.push(family_id);
                }
            }
            for (child_id, natural_father, natural_mother) in edges {
                individuals[child_id.0]
                    .parental_relationships
                    .push(ParentalRelationship {
                        family: family_id,
                        natural_father: natural_father && husband.is_some(),
                        natural_mother: natural_mother && wife.is_some(),
                    });
            }
            families.push(family);
        }

        debug!(
            "Linked {} individuals into {} families",
            individuals.len(),
            families.len()
        );

        let mut tree = FamilyTree::from_parts(individuals, families, individual_lookup, family_lookup);
        let added = tree.add_solo_families();
        if added > 0 {
            info!("Added {added} lone individuals as single families.");
        }
        Ok(tree)
    }
}
