//! Phonetic keys and standardised forenames
//!
//! Duplicate detection compares names by how they sound. The encoder and
//! the forename standardiser sit behind traits so callers can swap in
//! their own tables or algorithms.

use crate::error::{KinshipError, Result};
use crate::models::individual::UNKNOWN_NAME;
use crate::models::types::Gender;
use log::debug;
use rphonetic::{DoubleMetaphone, Encoder};
use rustc_hash::FxHashMap;
use std::fmt;

/// Turns a name into a phonetic key
pub trait PhoneticEncoder: Send + Sync {
    /// Phonetic key of `name`; blank and placeholder names give an empty key
    fn encode(&self, name: &str) -> String;
}

/// Primary Double Metaphone key
pub struct DoubleMetaphoneEncoder {
    inner: DoubleMetaphone,
}

impl DoubleMetaphoneEncoder {
    /// Create an encoder with the default key length
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: DoubleMetaphone::default(),
        }
    }
}

impl Default for DoubleMetaphoneEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DoubleMetaphoneEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DoubleMetaphoneEncoder")
    }
}

impl PhoneticEncoder for DoubleMetaphoneEncoder {
    fn encode(&self, name: &str) -> String {
        let name = name.trim();
        if name.is_empty() || name == UNKNOWN_NAME {
            return String::new();
        }
        self.inner.encode(name)
    }
}

/// Maps a forename to a canonical form, e.g. `Bill` to `William`
pub trait NameStandardiser: Send + Sync {
    /// Canonical form of `forename`; unknown names map to themselves
    fn standardise(&self, forename: &str, gender: Gender) -> String;
}

/// Forename equivalence table, split by gender
#[derive(Debug, Clone, Default)]
pub struct StandardisedNames {
    male: FxHashMap<String, String>,
    female: FxHashMap<String, String>,
}

impl StandardisedNames {
    /// Create an empty table where every name maps to itself
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a table from CSV lines of the form `g_in,g_out,name_in,name_out`
    ///
    /// Gender `2` marks a male name and `1` a female name. Blank lines and
    /// lines starting with `#` are skipped.
    ///
    /// # Errors
    /// `InvalidConfig` naming the first line that does not have four fields
    /// or has an unrecognised gender
    pub fn from_csv_str(csv: &str) -> Result<Self> {
        let mut names = Self::new();
        for (number, line) in csv.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let [gender_in, _gender_out, name_in, name_out] = fields[..] else {
                return Err(KinshipError::InvalidConfig(format!(
                    "standardised names line {}: expected 4 fields, found {}",
                    number + 1,
                    fields.len()
                )));
            };
            let table = match gender_in {
                "2" => &mut names.male,
                "1" => &mut names.female,
                other => {
                    return Err(KinshipError::InvalidConfig(format!(
                        "standardised names line {}: unknown gender '{other}'",
                        number + 1
                    )));
                }
            };
            table.insert(name_in.to_uppercase(), name_out.to_string());
        }
        debug!(
            "Loaded {} male and {} female standardised names",
            names.male.len(),
            names.female.len()
        );
        Ok(names)
    }

    /// Add one equivalence
    pub fn insert(&mut self, gender: Gender, name: &str, standard: &str) {
        let key = name.trim().to_uppercase();
        match gender {
            Gender::Male => {
                self.male.insert(key, standard.to_string());
            }
            Gender::Female => {
                self.female.insert(key, standard.to_string());
            }
            Gender::Unknown => {
                self.male.insert(key.clone(), standard.to_string());
                self.female.insert(key, standard.to_string());
            }
        }
    }

    /// Number of entries across both genders
    #[must_use]
    pub fn len(&self) -> usize {
        self.male.len() + self.female.len()
    }

    /// Whether the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.male.is_empty() && self.female.is_empty()
    }
}

impl NameStandardiser for StandardisedNames {
    fn standardise(&self, forename: &str, gender: Gender) -> String {
        let key = forename.trim().to_uppercase();
        let found = match gender {
            Gender::Male => self.male.get(&key),
            Gender::Female => self.female.get(&key),
            Gender::Unknown => self.male.get(&key).or_else(|| self.female.get(&key)),
        };
        found.cloned().unwrap_or_else(|| forename.trim().to_string())
    }
}
