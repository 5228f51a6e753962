//! Data-quality checker
//!
//! Runs every rule over every individual and family in one pass and
//! collects the findings by category. Rules are independent: none reads
//! another rule's output.

use crate::algorithm::quality::report::DataQualityReport;
use crate::algorithm::quality::{facts, family, individual};
use crate::config::DataQualityConfig;
use crate::graph::FamilyTree;
use crate::models::data_error::{
    DataError, DataErrorCategory, DataErrorGroup, ErrorEntity, Severity,
};
use crate::models::fact_date::FactDate;
use crate::models::ids::{FamilyId, IndividualId};
use crate::utils::logging::{log_operation_complete, log_operation_start};
use std::collections::BTreeMap;
use std::time::Instant;

/// Findings collected during a check, keyed by category
#[derive(Debug, Default)]
pub(crate) struct Findings {
    by_category: BTreeMap<DataErrorCategory, Vec<DataError>>,
}

impl Findings {
    /// Record a finding against an individual at the category's usual severity
    pub(crate) fn individual(
        &mut self,
        tree: &FamilyTree,
        id: IndividualId,
        category: DataErrorCategory,
        message: String,
    ) {
        self.individual_with_severity(tree, id, category, category.default_severity(), message);
    }

    pub(crate) fn individual_with_severity(
        &mut self,
        tree: &FamilyTree,
        id: IndividualId,
        category: DataErrorCategory,
        severity: Severity,
        message: String,
    ) {
        self.push(DataError {
            category,
            severity,
            entity: ErrorEntity::Individual(id),
            entity_id: tree.individual(id).id().to_string(),
            message,
        });
    }

    /// Record a finding against a family
    pub(crate) fn family(
        &mut self,
        tree: &FamilyTree,
        id: FamilyId,
        category: DataErrorCategory,
        severity: Severity,
        message: String,
    ) {
        self.push(DataError {
            category,
            severity,
            entity: ErrorEntity::Family(id),
            entity_id: tree.family(id).id().to_string(),
            message,
        });
    }

    fn push(&mut self, error: DataError) {
        self.by_category.entry(error.category).or_default().push(error);
    }

    /// One group per category in code order, empty groups included
    fn into_groups(mut self) -> Vec<DataErrorGroup> {
        DataErrorCategory::ALL
            .iter()
            .map(|category| DataErrorGroup {
                category: *category,
                errors: self.by_category.remove(category).unwrap_or_default(),
            })
            .collect()
    }
}

/// Inputs shared by every rule during one check
pub(crate) struct RuleContext<'a> {
    pub tree: &'a FamilyTree,
    pub config: &'a DataQualityConfig,
    pub today: FactDate,
}

/// Runs the data-quality rules over a tree
#[derive(Debug, Clone, Default)]
pub struct DataQualityChecker {
    config: DataQualityConfig,
}

impl DataQualityChecker {
    /// Create a checker with the given thresholds
    #[must_use]
    pub const fn new(config: DataQualityConfig) -> Self {
        Self { config }
    }

    /// Settings in use
    #[must_use]
    pub const fn config(&self) -> &DataQualityConfig {
        &self.config
    }

    /// Check the whole tree
    ///
    /// Returns one group per category, in category-code order, including
    /// categories with no findings.
    #[must_use]
    pub fn check(&self, tree: &FamilyTree) -> Vec<DataErrorGroup> {
        let start = Instant::now();
        log_operation_start(
            "Checking data quality of",
            &format!("{} individuals and {} families", tree.len(), tree.family_count()),
        );
        let context = RuleContext {
            tree,
            config: &self.config,
            today: self.config.today.map_or_else(FactDate::today, FactDate::on),
        };
        let mut findings = Findings::default();

        for id in tree.individual_ids() {
            individual::check_death(&context, id, &mut findings);
            individual::check_parents(&context, id, &mut findings);
            individual::check_marriages(&context, id, &mut findings);
            facts::check_individual_facts(&context, id, &mut findings);
            facts::check_duplicate_facts(&context, id, &mut findings);
            family::check_sibling_spacing(&context, id, &mut findings);
        }
        for (id, _) in tree.families() {
            family::check_couple(&context, id, &mut findings);
            facts::check_family_facts(&context, id, &mut findings);
        }

        let groups = findings.into_groups();
        let total: usize = groups.iter().map(DataErrorGroup::len).sum();
        log_operation_complete("reported", total, Some(start.elapsed()));
        groups
    }

    /// Check the whole tree and summarise the findings
    #[must_use]
    pub fn report(&self, tree: &FamilyTree) -> DataQualityReport {
        DataQualityReport::from_groups(self.check(tree))
    }
}
