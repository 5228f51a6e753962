//! Common domain type definitions
//!
//! This module contains the small enum types shared by the person graph,
//! the relationship classifier and the data-quality rules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gender of an individual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    /// Male gender
    Male,
    /// Female gender
    Female,
    /// Unknown or not specified
    #[default]
    Unknown,
}

impl Gender {
    /// Whether two genders could describe the same person
    ///
    /// Equal genders match, and an unknown gender matches anything.
    #[must_use]
    pub fn matches(self, other: Self) -> bool {
        self == other || self == Self::Unknown || other == Self::Unknown
    }
}

impl From<&str> for Gender {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" | "1" => Self::Male,
            "f" | "female" | "2" => Self::Female,
            _ => Self::Unknown,
        }
    }
}

impl From<i32> for Gender {
    fn from(value: i32) -> Self {
        match value {
            1 => Self::Male,
            2 => Self::Female,
            _ => Self::Unknown,
        }
    }
}

/// Relationship class of an individual relative to the chosen root
///
/// Lower numeric codes are stronger. A classified individual may only move
/// to a stronger class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum RelationType {
    /// Not connected to the root
    Unknown = 1,
    /// Root person or one of their ancestors
    Direct = 2,
    /// Descendant of the root
    Descendant = 4,
    /// Blood relative through a direct ancestor
    Blood = 8,
    /// Spouse of a direct ancestor or blood relative
    MarriedToDirectOrBlood = 16,
    /// Reached only through chains of marriages
    Marriage = 32,
    /// Shares a family with a classified person but nothing stronger
    Linked = 64,
    /// Never visited by a classification run
    #[default]
    Unset = 128,
}

impl RelationType {
    /// Numeric strength code, lower is stronger
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Whether the relation is to the root's own bloodline or their spouses
    #[must_use]
    pub const fn is_blood_or_direct(self) -> bool {
        matches!(
            self,
            Self::Direct | Self::Descendant | Self::Blood | Self::MarriedToDirectOrBlood
        )
    }

    /// Whether a classification run has assigned a relation
    #[must_use]
    pub const fn is_classified(self) -> bool {
        !matches!(self, Self::Unknown | Self::Unset)
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Direct => "Direct Ancestor",
            Self::Descendant => "Descendant",
            Self::Blood => "Blood Relation",
            Self::MarriedToDirectOrBlood => "Marr to Direct/Blood",
            Self::Marriage => "By Marriage",
            Self::Linked => "Linked by Marriages",
            Self::Unset => "Not Set",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Marital status recorded on a family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MaritalStatus {
    /// Couple recorded as married
    Married,
    /// Couple recorded as partners without marriage
    Unmarried,
    /// Single parent or solo family
    Single,
    /// No status recorded
    #[default]
    Unknown,
}

impl From<&str> for MaritalStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "married" | "marr" | "m" => Self::Married,
            "unmarried" | "partner" | "u" => Self::Unmarried,
            "single" | "s" => Self::Single,
            _ => Self::Unknown,
        }
    }
}
