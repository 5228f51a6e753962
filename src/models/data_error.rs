//! Data-quality findings
//!
//! Every finding belongs to exactly one category of a closed taxonomy. The
//! numeric codes are stable so exported reports stay comparable.

use crate::models::ids::{FamilyId, IndividualId};
use serde::Serialize;
use std::fmt;

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    /// Impossible data
    Error,
    /// Unlikely data
    Warning,
    /// Worth a second look
    Questionable,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "Error"),
            Self::Warning => write!(f, "Warning"),
            Self::Questionable => write!(f, "Questionable"),
        }
    }
}

/// Category of a data-quality rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
pub enum DataErrorCategory {
    /// Death or burial recorded before birth
    BirthAfterDeath = 0,
    /// Father older than 90 at the birth
    BirthAfterFatherAged90 = 1,
    /// Mother older than 60 at the birth
    BirthAfterMotherAged60 = 2,
    /// Mother died before the birth
    BirthAfterMotherDeath = 3,
    /// Father died well before the birth
    BirthAfterFatherDeath = 4,
    /// Father younger than 13 at the birth
    BirthBeforeFatherAged13 = 5,
    /// Mother younger than 13 at the birth
    BirthBeforeMotherAged13 = 6,
    /// Burial recorded before death
    BurialBeforeDeath = 7,
    /// Lived longer than the plausible maximum
    AgedMoreThan110 = 8,
    /// Fact dated before birth
    FactsBeforeBirth = 9,
    /// Fact dated after death
    FactsAfterDeath = 10,
    /// Married after own death
    MarriageAfterDeath = 11,
    /// Married after the spouse's death
    MarriageAfterSpouseDead = 12,
    /// Married before age 13
    MarriageBefore13 = 13,
    /// Married a spouse younger than 13
    MarriageBeforeSpouse13 = 14,
    /// Fact flagged as erroneous when loaded
    FactError = 19,
    /// Flagged as living with a death date
    LivingWithDeathDate = 21,
    /// Identical facts recorded twice
    DuplicateFact = 23,
    /// Facts with the same type and date recorded twice
    PossibleDuplicateFact = 24,
    /// Female husband or male wife
    MaleWifeFemaleHusband = 26,
    /// Husband and wife share a surname
    SameSurnameCouple = 27,
    /// Fact dated in the future
    FactAfterToday = 28,
    /// Siblings born implausibly close together
    SiblingsTooClose = 29,
    /// Siblings born unusually close together
    SiblingsQuestionablySpaced = 30,
}

impl DataErrorCategory {
    /// Every category in code order
    pub const ALL: [Self; 24] = [
        Self::BirthAfterDeath,
        Self::BirthAfterFatherAged90,
        Self::BirthAfterMotherAged60,
        Self::BirthAfterMotherDeath,
        Self::BirthAfterFatherDeath,
        Self::BirthBeforeFatherAged13,
        Self::BirthBeforeMotherAged13,
        Self::BurialBeforeDeath,
        Self::AgedMoreThan110,
        Self::FactsBeforeBirth,
        Self::FactsAfterDeath,
        Self::MarriageAfterDeath,
        Self::MarriageAfterSpouseDead,
        Self::MarriageBefore13,
        Self::MarriageBeforeSpouse13,
        Self::FactError,
        Self::LivingWithDeathDate,
        Self::DuplicateFact,
        Self::PossibleDuplicateFact,
        Self::MaleWifeFemaleHusband,
        Self::SameSurnameCouple,
        Self::FactAfterToday,
        Self::SiblingsTooClose,
        Self::SiblingsQuestionablySpaced,
    ];

    /// Stable numeric code
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Severity used unless a rule decides otherwise
    #[must_use]
    pub const fn default_severity(self) -> Severity {
        match self {
            Self::BirthAfterFatherAged90
            | Self::BirthAfterMotherAged60
            | Self::BirthAfterFatherDeath
            | Self::BirthBeforeFatherAged13
            | Self::BirthBeforeMotherAged13
            | Self::AgedMoreThan110
            | Self::MarriageBefore13
            | Self::MarriageBeforeSpouse13
            | Self::LivingWithDeathDate => Severity::Warning,
            Self::PossibleDuplicateFact
            | Self::SameSurnameCouple
            | Self::SiblingsQuestionablySpaced => Severity::Questionable,
            _ => Severity::Error,
        }
    }

    /// Short description used as the group heading
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::BirthAfterDeath => "Birth after death/burial",
            Self::BirthAfterFatherAged90 => "Birth after father aged 90+",
            Self::BirthAfterMotherAged60 => "Birth after mother aged 60+",
            Self::BirthAfterMotherDeath => "Birth after mother's death",
            Self::BirthAfterFatherDeath => "Birth more than 9m after father's death",
            Self::BirthBeforeFatherAged13 => "Birth before father aged 13",
            Self::BirthBeforeMotherAged13 => "Birth before mother aged 13",
            Self::BurialBeforeDeath => "Burial before death",
            Self::AgedMoreThan110 => "Aged more than 110",
            Self::FactsBeforeBirth => "Facts before birth",
            Self::FactsAfterDeath => "Facts after death",
            Self::MarriageAfterDeath => "Marriage after death",
            Self::MarriageAfterSpouseDead => "Marriage after spouse has died",
            Self::MarriageBefore13 => "Marriage before aged 13",
            Self::MarriageBeforeSpouse13 => "Marriage before spouse aged 13",
            Self::FactError => "Fact has an error",
            Self::LivingWithDeathDate => "Flagged as living but has death date",
            Self::DuplicateFact => "Duplicated fact",
            Self::PossibleDuplicateFact => "Possibly duplicated fact",
            Self::MaleWifeFemaleHusband => "Male wife or female husband",
            Self::SameSurnameCouple => "Couple with same surname",
            Self::FactAfterToday => "Fact dated after today",
            Self::SiblingsTooClose => "Siblings born too close together",
            Self::SiblingsQuestionablySpaced => "Siblings born within a year",
        }
    }
}

impl fmt::Display for DataErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Record a finding is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorEntity {
    /// An individual
    Individual(IndividualId),
    /// A family
    Family(FamilyId),
}

/// A single data-quality finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataError {
    /// Rule that produced the finding
    pub category: DataErrorCategory,
    /// Seriousness of the finding
    pub severity: Severity,
    /// Offending record
    pub entity: ErrorEntity,
    /// Source identifier of the offending record
    pub entity_id: String,
    /// Description including the values involved
    pub message: String,
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.entity_id, self.message)
    }
}

/// All findings of one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataErrorGroup {
    /// Category shared by the findings
    pub category: DataErrorCategory,
    /// Findings in discovery order
    pub errors: Vec<DataError>,
}

impl DataErrorGroup {
    /// Empty group for a category
    #[must_use]
    pub const fn new(category: DataErrorCategory) -> Self {
        Self {
            category,
            errors: Vec::new(),
        }
    }

    /// Number of findings
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether the group has no findings
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}
