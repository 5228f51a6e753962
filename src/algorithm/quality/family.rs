//! Rules about couples and the spacing of a mother's children

use crate::algorithm::quality::checker::{Findings, RuleContext};
use crate::models::data_error::{DataErrorCategory, Severity};
use crate::models::ids::{FamilyId, IndividualId};
use crate::models::individual::UNKNOWN_NAME;
use crate::models::types::Gender;
use itertools::Itertools;
use rustc_hash::FxHashSet;

/// Spouse genders and same-surname couples
///
/// A couple sharing a surname is not reported when the wife also shares it
/// with her natural father, since then it is her maiden name.
pub(crate) fn check_couple(context: &RuleContext<'_>, id: FamilyId, findings: &mut Findings) {
    let tree = context.tree;
    let family = tree.family(id);

    if let Some(husband) = family.husband() {
        let husband = tree.individual(husband);
        if husband.gender == Gender::Female {
            findings.family(
                tree,
                id,
                DataErrorCategory::MaleWifeFemaleHusband,
                Severity::Error,
                format!("Husband {} is female", husband.name()),
            );
        }
    }
    if let Some(wife) = family.wife() {
        let wife = tree.individual(wife);
        if wife.gender == Gender::Male {
            findings.family(
                tree,
                id,
                DataErrorCategory::MaleWifeFemaleHusband,
                Severity::Error,
                format!("Wife {} is male", wife.name()),
            );
        }
    }

    let (Some(husband_id), Some(wife_id)) = (family.husband(), family.wife()) else {
        return;
    };
    let husband = tree.individual(husband_id);
    let wife = tree.individual(wife_id);
    if husband.surname() == UNKNOWN_NAME || husband.surname() != wife.surname() {
        return;
    }
    let maiden_name = tree
        .natural_father(wife_id)
        .is_some_and(|father| tree.individual(father).surname() == wife.surname());
    if !maiden_name {
        findings.individual(
            tree,
            husband_id,
            DataErrorCategory::SameSurnameCouple,
            format!(
                "Spouse {} has same surname. Usually due to wife incorrectly recorded with married instead of maiden name.",
                wife.name()
            ),
        );
    }
}

/// Gaps between consecutive exact births of a woman's natural children
///
/// Gaps below the impossible range are treated as multiple births and
/// ignored.
pub(crate) fn check_sibling_spacing(
    context: &RuleContext<'_>,
    mother: IndividualId,
    findings: &mut Findings,
) {
    let tree = context.tree;
    let config = context.config;
    let mut seen = FxHashSet::default();

    let births = tree
        .individual(mother)
        .families_as_spouse()
        .iter()
        .filter(|family| tree.family(**family).wife() == Some(mother))
        .flat_map(|family| {
            tree.family(*family)
                .children()
                .iter()
                .map(move |child| (*family, *child))
        })
        .filter(|(family, child)| {
            tree.individual(*child)
                .parental_relationships()
                .iter()
                .any(|rel| rel.family == *family && rel.natural_mother)
        })
        .filter(|(_, child)| seen.insert(*child))
        .map(|(_, child)| child)
        .filter(|child| tree.individual(*child).birth_date().is_exact())
        .sorted_by_key(|child| tree.individual(*child).birth_date().start_date())
        .collect_vec();

    for (earlier, later) in births.iter().copied().tuple_windows() {
        let earlier_birth = tree.individual(earlier).birth_date();
        let later_birth = tree.individual(later).birth_date();
        let gap = (later_birth.start_date() - earlier_birth.start_date()).num_days();
        let category = if config.sibling_error_days.contains(&gap) {
            DataErrorCategory::SiblingsTooClose
        } else if config.sibling_questionable_days.contains(&gap) {
            DataErrorCategory::SiblingsQuestionablySpaced
        } else {
            continue;
        };
        findings.individual(
            tree,
            later,
            category,
            format!(
                "Born {later_birth}, only {gap} days after sibling {} born {earlier_birth}",
                tree.individual(earlier).name()
            ),
        );
    }
}
