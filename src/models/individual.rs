//! Individual entity model
//!
//! An `Individual` owns its personal facts and records which families it
//! belongs to, either as a spouse or as a child. The relationship fields are
//! written only by the relationship classifier.

use crate::models::fact::{Fact, FactType};
use crate::models::fact_date::{self, FactDate};
use crate::models::family::ParentalRelationship;
use crate::models::ids::{FamilyId, IndividualId};
use crate::models::location::FactLocation;
use crate::models::types::{Gender, RelationType};
use smallvec::SmallVec;
use std::sync::LazyLock;

/// Placeholder used for missing or meaningless names
pub const UNKNOWN_NAME: &str = "UNKNOWN";

static UNKNOWN_DATE: LazyLock<FactDate> = LazyLock::new(FactDate::unknown);
static BLANK_LOCATION: LazyLock<FactLocation> = LazyLock::new(FactLocation::blank);

/// Nearest direct ancestor a blood relative descends from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommonAncestor {
    /// The direct ancestor
    pub ancestor: IndividualId,
    /// Generations from the ancestor down to this individual
    pub distance: u32,
    /// Whether any link on the path is not a natural parent
    pub step: bool,
}

/// A person in the family tree
#[derive(Debug, Clone)]
pub struct Individual {
    id: String,
    forenames: String,
    surname: String,
    married_name: String,
    /// Gender of the individual
    pub gender: Gender,
    /// Marked as still living in the source file
    pub flagged_as_living: bool,
    facts: Vec<Fact>,
    pub(crate) families_as_spouse: SmallVec<[FamilyId; 2]>,
    pub(crate) parental_relationships: SmallVec<[ParentalRelationship; 1]>,
    pub(crate) relation_type: RelationType,
    pub(crate) ahnentafel: u128,
    pub(crate) budgie_code: String,
    pub(crate) common_ancestor: Option<CommonAncestor>,
    pub(crate) relation_to_root: String,
}

impl Individual {
    /// Create an individual from a GEDCOM-style name such as `John /Smith/`
    ///
    /// # Arguments
    /// * `id` - Identifier from the source file
    /// * `name` - Forenames followed by the surname between slashes
    /// * `gender` - Recorded gender
    #[must_use]
    pub fn new(id: &str, name: &str, gender: Gender) -> Self {
        let (forenames, surname) = parse_name(name);
        Self {
            id: id.trim().to_string(),
            married_name: surname.clone(),
            forenames,
            surname,
            gender,
            flagged_as_living: false,
            facts: Vec::new(),
            families_as_spouse: SmallVec::new(),
            parental_relationships: SmallVec::new(),
            relation_type: RelationType::Unset,
            ahnentafel: 0,
            budgie_code: String::new(),
            common_ancestor: None,
            relation_to_root: String::new(),
        }
    }

    /// Add a fact, builder style
    #[must_use]
    pub fn with_fact(mut self, fact: Fact) -> Self {
        self.facts.push(fact);
        self
    }

    /// Set the married name, builder style
    #[must_use]
    pub fn with_married_name(mut self, married_name: &str) -> Self {
        self.married_name = clean_name_part(married_name);
        self
    }

    /// Mark the individual as living, builder style
    #[must_use]
    pub fn living(mut self) -> Self {
        self.flagged_as_living = true;
        self
    }

    /// Add a fact
    pub fn add_fact(&mut self, fact: Fact) {
        self.facts.push(fact);
    }

    /// Identifier from the source file
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn set_id(&mut self, id: String) {
        self.id = id;
    }

    /// Full name, forenames then surname
    #[must_use]
    pub fn name(&self) -> String {
        format!("{} {}", self.forenames, self.surname)
    }

    /// All forenames
    #[must_use]
    pub fn forenames(&self) -> &str {
        &self.forenames
    }

    /// First forename only
    #[must_use]
    pub fn forename(&self) -> &str {
        self.forenames.split_whitespace().next().unwrap_or(UNKNOWN_NAME)
    }

    /// Surname at birth
    #[must_use]
    pub fn surname(&self) -> &str {
        &self.surname
    }

    /// Married surname, the birth surname unless recorded otherwise
    #[must_use]
    pub fn married_name(&self) -> &str {
        &self.married_name
    }

    /// Whether the forename or surname is the placeholder name
    #[must_use]
    pub fn has_unknown_name(&self) -> bool {
        self.surname == UNKNOWN_NAME || self.forename() == UNKNOWN_NAME
    }

    /// Whether the individual is recorded as male
    #[must_use]
    pub fn is_male(&self) -> bool {
        self.gender == Gender::Male
    }

    /// Whether the two genders could belong to the same person
    #[must_use]
    pub fn gender_matches(&self, other: &Self) -> bool {
        self.gender.matches(other.gender)
    }

    /// Personal facts in recorded order
    #[must_use]
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// Preferred fact of a type, falling back to the first one recorded
    #[must_use]
    pub fn preferred_fact(&self, fact_type: &FactType) -> Option<&Fact> {
        let mut of_type = self.facts.iter().filter(|f| &f.fact_type == fact_type);
        let first = of_type.next()?;
        if first.preferred {
            return Some(first);
        }
        of_type.find(|f| f.preferred).or(Some(first))
    }

    /// Birth fact, or the birth calculated from an age if none was recorded
    #[must_use]
    pub fn birth_fact(&self) -> Option<&Fact> {
        self.preferred_fact(&FactType::Birth)
            .or_else(|| self.preferred_fact(&FactType::BirthCalc))
    }

    /// Death fact
    #[must_use]
    pub fn death_fact(&self) -> Option<&Fact> {
        self.preferred_fact(&FactType::Death)
    }

    /// Burial fact, or cremation if no burial was recorded
    #[must_use]
    pub fn burial_fact(&self) -> Option<&Fact> {
        self.preferred_fact(&FactType::Burial)
            .or_else(|| self.preferred_fact(&FactType::Cremation))
    }

    /// Baptism fact, or christening if no baptism was recorded
    #[must_use]
    pub fn baptism_fact(&self) -> Option<&Fact> {
        self.preferred_fact(&FactType::Baptism)
            .or_else(|| self.preferred_fact(&FactType::Christening))
    }

    /// Birth date, unknown if not recorded
    #[must_use]
    pub fn birth_date(&self) -> &FactDate {
        self.birth_fact().map_or(&*UNKNOWN_DATE, |f| &f.date)
    }

    /// Death date, unknown if not recorded
    #[must_use]
    pub fn death_date(&self) -> &FactDate {
        self.death_fact().map_or(&*UNKNOWN_DATE, |f| &f.date)
    }

    /// Burial or cremation date, unknown if not recorded
    #[must_use]
    pub fn burial_date(&self) -> &FactDate {
        self.burial_fact().map_or(&*UNKNOWN_DATE, |f| &f.date)
    }

    /// Baptism or christening date, unknown if not recorded
    #[must_use]
    pub fn baptism_date(&self) -> &FactDate {
        self.baptism_fact().map_or(&*UNKNOWN_DATE, |f| &f.date)
    }

    /// Birth location, blank if not recorded
    #[must_use]
    pub fn birth_location(&self) -> &FactLocation {
        self.birth_fact().map_or(&*BLANK_LOCATION, |f| &f.location)
    }

    /// Youngest the individual could have been at `when`
    #[must_use]
    pub fn min_age_at(&self, when: &FactDate) -> i32 {
        fact_date::min_years_between(self.birth_date(), when)
    }

    /// Oldest the individual could have been at `when`
    #[must_use]
    pub fn max_age_at(&self, when: &FactDate) -> i32 {
        fact_date::max_years_between(self.birth_date(), when)
    }

    /// Families where this individual is a husband or wife
    #[must_use]
    pub fn families_as_spouse(&self) -> &[FamilyId] {
        &self.families_as_spouse
    }

    /// Families where this individual is a child
    #[must_use]
    pub fn parental_relationships(&self) -> &[ParentalRelationship] {
        &self.parental_relationships
    }

    /// Relationship class relative to the last classified root
    #[must_use]
    pub const fn relation_type(&self) -> RelationType {
        self.relation_type
    }

    /// Ahnentafel number, zero unless a direct ancestor
    #[must_use]
    pub const fn ahnentafel(&self) -> u128 {
        self.ahnentafel
    }

    /// Display code derived from the Ahnentafel number or child position
    #[must_use]
    pub fn budgie_code(&self) -> &str {
        &self.budgie_code
    }

    /// Nearest direct ancestor shared with the root
    #[must_use]
    pub const fn common_ancestor(&self) -> Option<CommonAncestor> {
        self.common_ancestor
    }

    /// Kinship description relative to the root
    #[must_use]
    pub fn relation_to_root(&self) -> &str {
        &self.relation_to_root
    }

    /// Whether the individual is the root, an ancestor, a blood relative or
    /// the spouse of one
    #[must_use]
    pub const fn is_blood_or_direct(&self) -> bool {
        self.relation_type.is_blood_or_direct()
    }

    /// Apply a relation type if it is stronger than the current one
    ///
    /// Returns `true` when the stored value changed.
    pub(crate) fn set_relation_type(&mut self, relation: RelationType) -> bool {
        if !relation.is_classified() {
            return false;
        }
        let current = self.relation_type;
        if !current.is_classified() || relation.code() < current.code() {
            self.relation_type = relation;
            return true;
        }
        false
    }

    pub(crate) fn clear_relations(&mut self) {
        self.relation_type = RelationType::Unknown;
        self.ahnentafel = 0;
        self.budgie_code.clear();
        self.common_ancestor = None;
        self.relation_to_root.clear();
    }
}

/// Split `Forenames /Surname/` into cleaned forenames and surname
fn parse_name(name: &str) -> (String, String) {
    let name = name.trim();
    match name.find('/') {
        Some(start) => {
            let rest = &name[start + 1..];
            let end = rest.find('/').unwrap_or(rest.len());
            let surname = &rest[..end];
            let forenames = &name[..start];
            (clean_name_part(forenames), clean_name_part(surname))
        }
        None => (clean_name_part(name), UNKNOWN_NAME.to_string()),
    }
}

fn clean_name_part(part: &str) -> String {
    let part = part.split_whitespace().collect::<Vec<_>>().join(" ");
    if is_placeholder_name(&part) {
        UNKNOWN_NAME.to_string()
    } else {
        part
    }
}

fn is_placeholder_name(name: &str) -> bool {
    if name.is_empty() {
        return true;
    }
    let lower = name.to_lowercase();
    if matches!(lower.as_str(), "mnu" | "lnu" | "unk" | "unknown" | "[--?--]") {
        return true;
    }
    let mut chars = name.chars();
    let first = chars.next().unwrap_or('.');
    matches!(first, '.' | '?' | '_') && chars.all(|c| c == first)
}
