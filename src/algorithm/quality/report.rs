//! Summary of a data-quality check

use crate::error::Result;
use crate::models::data_error::{DataErrorCategory, DataErrorGroup, Severity};
use serde::Serialize;
use std::fmt;

/// Findings grouped by category with totals per severity
#[derive(Debug, Clone, Serialize)]
pub struct DataQualityReport {
    /// One group per category in code order
    pub groups: Vec<DataErrorGroup>,
    /// Findings of any severity
    pub total: usize,
    /// Findings of severity `Error`
    pub errors: usize,
    /// Findings of severity `Warning`
    pub warnings: usize,
    /// Findings of severity `Questionable`
    pub questionable: usize,
}

impl DataQualityReport {
    /// Summarise checker output
    #[must_use]
    pub fn from_groups(groups: Vec<DataErrorGroup>) -> Self {
        let severities = groups
            .iter()
            .flat_map(|group| &group.errors)
            .map(|error| error.severity);
        let (mut errors, mut warnings, mut questionable) = (0, 0, 0);
        for severity in severities {
            match severity {
                Severity::Error => errors += 1,
                Severity::Warning => warnings += 1,
                Severity::Questionable => questionable += 1,
            }
        }
        Self {
            total: errors + warnings + questionable,
            groups,
            errors,
            warnings,
            questionable,
        }
    }

    /// The group for one category
    #[must_use]
    pub fn group(&self, category: DataErrorCategory) -> Option<&DataErrorGroup> {
        self.groups.iter().find(|group| group.category == category)
    }

    /// Groups that have at least one finding
    pub fn non_empty(&self) -> impl Iterator<Item = &DataErrorGroup> {
        self.groups.iter().filter(|group| !group.is_empty())
    }

    /// Render as pretty-printed JSON
    ///
    /// # Errors
    /// `Json` if serialisation fails
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for DataQualityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Data quality: {} issues ({} errors, {} warnings, {} questionable)",
            self.total, self.errors, self.warnings, self.questionable
        )?;
        for group in self.non_empty() {
            writeln!(f, "  {} [{}]: {}", group.category, group.category.code(), group.len())?;
        }
        Ok(())
    }
}
