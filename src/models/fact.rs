//! Facts recorded against individuals and families
//!
//! A fact is a typed event or attribute (birth, marriage, residence, ...)
//! with a date, a location and an optional comment.

use crate::models::fact_date::FactDate;
use crate::models::location::FactLocation;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! fact_types {
    ($($variant:ident => $tag:literal, $description:literal;)*) => {
        /// Type of a fact, keyed by its GEDCOM tag
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum FactType {
            $(
                #[doc = $description]
                $variant,
            )*
            /// Any tag without a dedicated variant
            Other(String),
        }

        impl FactType {
            /// GEDCOM tag for this type
            #[must_use]
            pub fn tag(&self) -> &str {
                match self {
                    $(Self::$variant => $tag,)*
                    Self::Other(tag) => tag,
                }
            }

            /// Human-readable name for this type
            #[must_use]
            pub fn description(&self) -> &str {
                match self {
                    $(Self::$variant => $description,)*
                    Self::Other(tag) => tag,
                }
            }
        }

        impl From<&str> for FactType {
            fn from(s: &str) -> Self {
                let tag = s.trim().to_uppercase();
                match tag.as_str() {
                    $($tag => Self::$variant,)*
                    _ => Self::Other(tag),
                }
            }
        }
    };
}

fact_types! {
    Adoption => "ADOP", "Adoption";
    AdultChristening => "CHRA", "Adult christening";
    Arrival => "*ARRI", "Arrival";
    Baptism => "BAPM", "Baptism";
    BarMitzvah => "BARM", "Bar mitzvah";
    BasMitzvah => "BASM", "Bas mitzvah";
    Birth => "BIRT", "Birth";
    BirthCalc => "_BIRTHCALC", "Birth (Calc from Age)";
    Burial => "BURI", "Burial";
    Census => "CENS", "Census";
    Christening => "CHR", "Christening";
    Confirmation => "CONF", "Confirmation";
    Cremation => "CREM", "Cremation";
    Death => "DEAT", "Death";
    Degree => "_DEG", "Degree";
    Departure => "*DEPT", "Departure";
    Divorce => "DIV", "Divorce";
    Education => "EDUC", "Education";
    Emigration => "EMIG", "Emigration";
    FirstCommunion => "FCOM", "First communion";
    Graduation => "GRAD", "Graduation";
    Immigration => "IMMI", "Immigration";
    Marriage => "MARR", "Marriage";
    MarriageBanns => "MARB", "Marriage banns";
    MarriageContract => "MARC", "Marriage contract";
    MarriageLicense => "MARL", "Marriage license";
    MarriageSettlement => "MARS", "Marriage settlement";
    Military => "_MILT", "Military service";
    Naturalization => "NATU", "Naturalization";
    Occupation => "OCCU", "Occupation";
    Ordination => "ORDN", "Ordination";
    Probate => "PROB", "Probate";
    Residence => "RESI", "Residence";
    Retirement => "RETI", "Retirement";
    Will => "WILL", "Will";
    Witness => "*WITNE", "Witness";
}

impl FactType {
    /// Facts that should not normally be dated before the person's birth
    #[must_use]
    pub const fn is_loose_birth_fact(&self) -> bool {
        matches!(
            self,
            Self::Christening
                | Self::Baptism
                | Self::Death
                | Self::Cremation
                | Self::Burial
                | Self::BirthCalc
                | Self::Marriage
                | Self::MarriageBanns
                | Self::MarriageContract
                | Self::MarriageLicense
                | Self::MarriageSettlement
        ) || self.is_loose_death_fact()
    }

    /// Facts that should not normally be dated after the person's death
    #[must_use]
    pub const fn is_loose_death_fact(&self) -> bool {
        matches!(
            self,
            Self::Residence
                | Self::Witness
                | Self::Emigration
                | Self::Immigration
                | Self::Arrival
                | Self::Departure
                | Self::Education
                | Self::Degree
                | Self::Adoption
                | Self::BarMitzvah
                | Self::BasMitzvah
                | Self::AdultChristening
                | Self::Confirmation
                | Self::FirstCommunion
                | Self::Ordination
                | Self::Naturalization
                | Self::Graduation
                | Self::Retirement
        )
    }

    /// Marriage and marriage-preliminary facts
    #[must_use]
    pub const fn is_marriage_fact(&self) -> bool {
        matches!(
            self,
            Self::Marriage
                | Self::MarriageBanns
                | Self::MarriageContract
                | Self::MarriageLicense
                | Self::MarriageSettlement
        )
    }
}

impl fmt::Display for FactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Severity of a problem flagged on a fact by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FactErrorLevel {
    /// No problem
    Good = 0,
    /// Warning that still allows the fact to be used
    WarningAllow = 1,
    /// Warning; the fact is ignored
    WarningIgnore = 2,
    /// Fact is in error
    Error = 3,
    /// Fact is doubtful
    Questionable = 4,
    /// Fact is ignored entirely
    Ignore = 5,
}

/// Problem recorded against a fact while it was loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactError {
    /// Severity of the problem
    pub level: FactErrorLevel,
    /// Loader's description of the problem
    pub message: String,
}

/// A dated, located event or attribute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fact {
    /// Type of the fact
    pub fact_type: FactType,
    /// When the fact happened
    pub date: FactDate,
    /// Where the fact happened
    pub location: FactLocation,
    /// Free-text comment
    pub comment: String,
    /// Marked as the preferred fact of its type
    pub preferred: bool,
    /// Derived rather than read from the source file
    pub created: bool,
    /// Problem flagged by the loader, if any
    pub error: Option<FactError>,
    pub(crate) family_id: Option<String>,
}

impl Fact {
    /// Create a fact of the given type and date
    #[must_use]
    pub fn new(fact_type: impl Into<FactType>, date: impl Into<FactDate>) -> Self {
        Self {
            fact_type: fact_type.into(),
            date: date.into(),
            location: FactLocation::blank(),
            comment: String::new(),
            preferred: false,
            created: false,
            error: None,
            family_id: None,
        }
    }

    /// Set the location
    #[must_use]
    pub fn with_location(mut self, location: impl Into<FactLocation>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the comment
    #[must_use]
    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = comment.trim().to_string();
        self
    }

    /// Mark as the preferred fact of its type
    #[must_use]
    pub fn preferred(mut self) -> Self {
        self.preferred = true;
        self
    }

    /// Mark as derived rather than recorded
    #[must_use]
    pub fn created(mut self) -> Self {
        self.created = true;
        self
    }

    /// Attach a loader-flagged problem
    #[must_use]
    pub fn with_error(mut self, level: FactErrorLevel, message: &str) -> Self {
        self.error = Some(FactError {
            level,
            message: message.to_string(),
        });
        self
    }

    /// Identifier of the family owning this fact, for family facts
    #[must_use]
    pub fn family_id(&self) -> Option<&str> {
        self.family_id.as_deref()
    }

    /// Whether the loader flagged this fact as being in error
    #[must_use]
    pub fn is_in_error(&self) -> bool {
        self.error
            .as_ref()
            .is_some_and(|e| e.level == FactErrorLevel::Error)
    }

    /// Structural key used to find exact duplicate facts
    #[must_use]
    pub fn equal_hash(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}|{}",
            self.fact_type.tag(),
            self.family_id.as_deref().unwrap_or_default(),
            self.date,
            self.location,
            self.comment,
            self.fact_type.is_marriage_fact()
        )
    }

    /// Looser key, ignoring location and comment, used for possible duplicates
    #[must_use]
    pub fn possibly_equal_hash(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.fact_type.tag(),
            self.family_id.as_deref().unwrap_or_default(),
            self.date,
            self.fact_type.is_marriage_fact()
        )
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.fact_type, self.date)?;
        if !self.location.text().is_empty() {
            write!(f, " at {}", self.location)?;
        }
        if !self.comment.is_empty() {
            write!(f, "  ({})", self.comment)?;
        }
        Ok(())
    }
}
