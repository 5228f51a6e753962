//! Fact locations
//!
//! Place text is split on commas from the right, so `place, address,
//! subregion, region, country` fills the parts from the country inwards.
//! Anything beyond four commas stays in the place part.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Countries recognised when deciding whether two locations conflict
const KNOWN_COUNTRIES: &[&str] = &[
    "England",
    "Scotland",
    "Wales",
    "Ireland",
    "Northern Ireland",
    "Isle of Man",
    "Channel Islands",
    "United Kingdom",
    "United States",
    "USA",
    "Canada",
    "Australia",
    "New Zealand",
    "South Africa",
    "India",
    "France",
    "Germany",
    "Netherlands",
    "Belgium",
    "Luxembourg",
    "Denmark",
    "Norway",
    "Sweden",
    "Finland",
    "Iceland",
    "Italy",
    "Spain",
    "Portugal",
    "Switzerland",
    "Austria",
    "Poland",
    "Czech Republic",
    "Hungary",
    "Russia",
    "Ukraine",
    "Greece",
    "Mexico",
    "Argentina",
    "Brazil",
    "Chile",
    "Jamaica",
    "Barbados",
    "Malta",
    "Gibraltar",
];

/// Specificity of a location, from country down to place
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LocationLevel {
    /// Country only
    Country = 0,
    /// Region, e.g. a county or state
    Region = 1,
    /// Subregion, e.g. a parish or town
    SubRegion = 2,
    /// Street address
    Address = 3,
    /// Named place such as a farm or building
    Place = 4,
}

/// A place split into its hierarchical parts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactLocation {
    text: String,
    /// Country part
    pub country: String,
    /// Region part
    pub region: String,
    /// Subregion part
    pub subregion: String,
    /// Address part
    pub address: String,
    /// Place part
    pub place: String,
}

impl FactLocation {
    /// Parse a comma-separated location
    #[must_use]
    pub fn new(text: &str) -> Self {
        let trimmed = text.trim();
        let mut parts: Vec<String> = trimmed
            .rsplitn(5, ',')
            .map(|part| part.trim().to_string())
            .collect();
        parts.resize(5, String::new());

        let mut location = Self {
            text: trimmed.to_string(),
            ..Self::default()
        };
        let mut parts = parts.into_iter();
        location.country = parts.next().unwrap_or_default();
        location.region = parts.next().unwrap_or_default();
        location.subregion = parts.next().unwrap_or_default();
        location.address = parts.next().unwrap_or_default();
        location.place = parts.next().unwrap_or_default();
        location
    }

    /// An empty location
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    /// Original text of the location
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True when no country is recorded
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.country.is_empty()
    }

    /// Whether the country is one of the recognised countries
    #[must_use]
    pub fn is_known_country(&self) -> bool {
        KNOWN_COUNTRIES
            .iter()
            .any(|c| c.eq_ignore_ascii_case(&self.country))
    }

    /// Most specific level with a value
    #[must_use]
    pub fn level(&self) -> LocationLevel {
        if !self.place.is_empty() {
            LocationLevel::Place
        } else if !self.address.is_empty() {
            LocationLevel::Address
        } else if !self.subregion.is_empty() {
            LocationLevel::SubRegion
        } else if !self.region.is_empty() {
            LocationLevel::Region
        } else {
            LocationLevel::Country
        }
    }

    /// Value of the part at `level`
    #[must_use]
    pub fn part(&self, level: LocationLevel) -> &str {
        match level {
            LocationLevel::Country => &self.country,
            LocationLevel::Region => &self.region,
            LocationLevel::SubRegion => &self.subregion,
            LocationLevel::Address => &self.address,
            LocationLevel::Place => &self.place,
        }
    }
}

impl PartialEq for FactLocation {
    fn eq(&self, other: &Self) -> bool {
        [
            LocationLevel::Country,
            LocationLevel::Region,
            LocationLevel::SubRegion,
            LocationLevel::Address,
            LocationLevel::Place,
        ]
        .into_iter()
        .all(|level| self.part(level).eq_ignore_ascii_case(other.part(level)))
    }
}

impl Eq for FactLocation {}

impl From<&str> for FactLocation {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for FactLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
