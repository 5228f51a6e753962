//! Rules about individual facts: dating, loader errors and duplicates

use crate::algorithm::quality::checker::{Findings, RuleContext};
use crate::models::data_error::{DataErrorCategory, Severity};
use crate::models::fact::{Fact, FactErrorLevel, FactType};
use crate::models::ids::{FamilyId, IndividualId};
use crate::models::individual::Individual;
use itertools::Itertools;
use rustc_hash::FxHashSet;

/// Severity of a loader-flagged problem, or `None` when nothing is wrong
fn fact_error_severity(fact: &Fact) -> Option<Severity> {
    match fact.error.as_ref()?.level {
        FactErrorLevel::Good | FactErrorLevel::Ignore => None,
        FactErrorLevel::Error => Some(Severity::Error),
        FactErrorLevel::WarningAllow | FactErrorLevel::WarningIgnore => Some(Severity::Warning),
        FactErrorLevel::Questionable => Some(Severity::Questionable),
    }
}

fn fact_before_birth(individual: &Individual, fact: &Fact, grace_months: u32) -> bool {
    let fact_type = &fact.fact_type;
    if matches!(fact_type, FactType::Birth | FactType::BirthCalc)
        || !fact_type.is_loose_birth_fact()
    {
        return false;
    }
    let birth = individual.birth_date();
    if !fact.date.is_before(birth) {
        return false;
    }
    if matches!(fact_type, FactType::Christening | FactType::Baptism) {
        fact.date.is_before(&birth.subtract_months(grace_months))
    } else {
        true
    }
}

fn fact_after_death(individual: &Individual, fact: &Fact) -> bool {
    fact.fact_type.is_loose_death_fact() && fact.date.is_after(individual.death_date())
}

/// Dating and loader-error rules over every fact the individual is part of
pub(crate) fn check_individual_facts(
    context: &RuleContext<'_>,
    id: IndividualId,
    findings: &mut Findings,
) {
    let tree = context.tree;
    let individual = tree.individual(id);

    for fact in individual.facts() {
        if let Some(severity) = fact_error_severity(fact) {
            let message = fact.error.as_ref().map_or("", |e| e.message.as_str());
            findings.individual_with_severity(
                tree,
                id,
                DataErrorCategory::FactError,
                severity,
                format!("{} fact error: {message}", fact.fact_type),
            );
        }
        if fact.date.is_after(&context.today) {
            findings.individual(
                tree,
                id,
                DataErrorCategory::FactAfterToday,
                format!("{} fact dated {} is after today", fact.fact_type, fact.date),
            );
        }
    }

    for fact in tree.all_facts(id) {
        if fact_before_birth(individual, fact, context.config.christening_grace_months) {
            findings.individual(
                tree,
                id,
                DataErrorCategory::FactsBeforeBirth,
                format!(
                    "{} fact dated {} before born {}",
                    fact.fact_type,
                    fact.date,
                    individual.birth_date()
                ),
            );
        }
        if fact_after_death(individual, fact) {
            findings.individual(
                tree,
                id,
                DataErrorCategory::FactsAfterDeath,
                format!(
                    "{} fact dated {} after died {}",
                    fact.fact_type,
                    fact.date,
                    individual.death_date()
                ),
            );
        }
    }
}

/// Exact and possible duplicate facts among those read from the source
///
/// A fact reported as an exact duplicate is not reported again as a
/// possible duplicate.
pub(crate) fn check_duplicate_facts(
    context: &RuleContext<'_>,
    id: IndividualId,
    findings: &mut Findings,
) {
    let tree = context.tree;
    let file_facts = tree
        .all_facts(id)
        .into_iter()
        .filter(|fact| !fact.created)
        .collect_vec();

    let exact_counts = file_facts.iter().counts_by(|fact| fact.equal_hash());
    let possible_counts = file_facts
        .iter()
        .counts_by(|fact| fact.possibly_equal_hash());

    let mut seen = FxHashSet::default();
    let mut reported = FxHashSet::default();
    for fact in &file_facts {
        let key = fact.equal_hash();
        if exact_counts.get(&key).is_some_and(|n| *n > 1) && seen.insert(key) {
            reported.insert(fact.possibly_equal_hash());
            findings.individual(
                tree,
                id,
                DataErrorCategory::DuplicateFact,
                format!("Duplicated {} fact recorded", fact.fact_type),
            );
        }
    }

    for fact in &file_facts {
        let key = fact.possibly_equal_hash();
        if possible_counts.get(&key).is_some_and(|n| *n > 1) && reported.insert(key) {
            findings.individual(
                tree,
                id,
                DataErrorCategory::PossibleDuplicateFact,
                format!("Possibly duplicated {} fact recorded", fact.fact_type),
            );
        }
    }
}

/// Loader-flagged errors and future dates on family facts
pub(crate) fn check_family_facts(context: &RuleContext<'_>, id: FamilyId, findings: &mut Findings) {
    let tree = context.tree;
    for fact in tree.family(id).facts() {
        if fact
            .error
            .as_ref()
            .is_some_and(|e| e.level == FactErrorLevel::Error)
        {
            let message = fact.error.as_ref().map_or("", |e| e.message.as_str());
            findings.family(
                tree,
                id,
                DataErrorCategory::FactError,
                Severity::Error,
                format!("{} fact error: {message}", fact.fact_type),
            );
        }
        if fact.date.is_after(&context.today) {
            findings.family(
                tree,
                id,
                DataErrorCategory::FactAfterToday,
                Severity::Error,
                format!("{} fact dated {} is after today", fact.fact_type, fact.date),
            );
        }
    }
}
