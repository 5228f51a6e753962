//! Configuration for the analysis passes
//!
//! Each pass has its own settings struct with sensible defaults.
//! `AnalyzerConfig` bundles them and can be loaded from JSON.

use crate::error::{KinshipError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Settings for the relationship classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Whether to keep multi-path ancestor conflicts in the report
    pub record_conflicts: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            record_conflicts: true,
        }
    }
}

impl ClassifierConfig {
    /// Set whether conflicts are recorded
    #[must_use]
    pub const fn with_record_conflicts(mut self, record: bool) -> Self {
        self.record_conflicts = record;
        self
    }
}

/// Settings for duplicate scanning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuplicateConfig {
    /// Lowest score kept when building the candidate list
    pub min_score: i32,
    /// Pairs whose birth dates differ by this many years² or more are skipped
    pub eligibility_distance_squared: f64,
    /// Worker threads used to score surname groups
    pub worker_threads: usize,
    /// Interval between progress reports
    pub progress_interval_ms: u64,
    /// Whether to draw a terminal progress bar
    pub show_progress_bar: bool,
}

impl Default for DuplicateConfig {
    fn default() -> Self {
        Self {
            min_score: 0,
            eligibility_distance_squared: 5.0,
            worker_threads: num_cpus::get(),
            progress_interval_ms: 250,
            show_progress_bar: false,
        }
    }
}

impl DuplicateConfig {
    /// Set the minimum score
    #[must_use]
    pub const fn with_min_score(mut self, min_score: i32) -> Self {
        self.min_score = min_score;
        self
    }

    /// Set the number of worker threads
    #[must_use]
    pub const fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads;
        self
    }

    /// Set the progress reporting interval
    #[must_use]
    pub const fn with_progress_interval_ms(mut self, interval: u64) -> Self {
        self.progress_interval_ms = interval;
        self
    }

    /// Enable or disable the terminal progress bar
    #[must_use]
    pub const fn with_progress_bar(mut self, show: bool) -> Self {
        self.show_progress_bar = show;
        self
    }

    /// Check the settings are usable
    ///
    /// # Errors
    /// `InvalidConfig` for zero workers, a zero interval or a non-positive
    /// eligibility threshold
    pub fn validate(&self) -> Result<()> {
        if self.worker_threads == 0 {
            return Err(KinshipError::InvalidConfig(
                "worker_threads must be at least 1".to_string(),
            ));
        }
        if self.progress_interval_ms == 0 {
            return Err(KinshipError::InvalidConfig(
                "progress_interval_ms must be positive".to_string(),
            ));
        }
        if self.eligibility_distance_squared.is_nan() || self.eligibility_distance_squared <= 0.0 {
            return Err(KinshipError::InvalidConfig(
                "eligibility_distance_squared must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings for the data-quality checker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataQualityConfig {
    /// Date treated as today; the local date when unset
    pub today: Option<NaiveDate>,
    /// Oldest plausible age at death
    pub max_age_years: i32,
    /// Oldest plausible father at a birth
    pub father_max_age: i32,
    /// Oldest plausible mother at a birth
    pub mother_max_age: i32,
    /// Youngest plausible parent or spouse
    pub min_parent_age: i32,
    /// Sibling birth gaps in days that are impossible
    pub sibling_error_days: Range<i64>,
    /// Sibling birth gaps in days that are unusual
    pub sibling_questionable_days: Range<i64>,
    /// Months a christening or baptism may precede a recorded birth
    pub christening_grace_months: u32,
    /// Months a father may have died before a birth
    pub father_death_grace_months: u32,
}

impl Default for DataQualityConfig {
    fn default() -> Self {
        Self {
            today: None,
            max_age_years: 110,
            father_max_age: 90,
            mother_max_age: 60,
            min_parent_age: 13,
            sibling_error_days: 10..168,
            sibling_questionable_days: 168..365,
            christening_grace_months: 4,
            father_death_grace_months: 9,
        }
    }
}

impl DataQualityConfig {
    /// Pin the date treated as today
    #[must_use]
    pub const fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }
}

/// All analysis settings together
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Relationship classifier settings
    pub classifier: ClassifierConfig,
    /// Duplicate scanner settings
    pub duplicates: DuplicateConfig,
    /// Data-quality checker settings
    pub data_quality: DataQualityConfig,
}

impl AnalyzerConfig {
    /// Load settings from JSON; missing fields take their defaults
    ///
    /// # Errors
    /// `Json` for malformed input, `InvalidConfig` for unusable values
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.duplicates.validate()?;
        Ok(config)
    }
}

impl fmt::Display for AnalyzerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analyzer Configuration:")?;
        writeln!(f, "  Record Ancestor Conflicts: {}", self.classifier.record_conflicts)?;
        writeln!(f, "  Duplicate Minimum Score: {}", self.duplicates.min_score)?;
        writeln!(
            f,
            "  Duplicate Birth Distance²: < {}",
            self.duplicates.eligibility_distance_squared
        )?;
        writeln!(f, "  Worker Threads: {}", self.duplicates.worker_threads)?;
        if let Some(today) = self.data_quality.today {
            writeln!(f, "  Today: {today}")?;
        }
        writeln!(f, "  Maximum Age: {}", self.data_quality.max_age_years)?;
        writeln!(
            f,
            "  Parent Age Limits: {}..{} (father) / {}..{} (mother)",
            self.data_quality.min_parent_age,
            self.data_quality.father_max_age,
            self.data_quality.min_parent_age,
            self.data_quality.mother_max_age
        )?;
        Ok(())
    }
}
