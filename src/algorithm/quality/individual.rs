//! Rules about one individual's life events, parents and marriages

use crate::algorithm::quality::checker::{Findings, RuleContext};
use crate::models::data_error::DataErrorCategory;
use crate::models::fact_date::{FactDate, min_date};
use crate::models::ids::IndividualId;

/// Births before this year are too poorly recorded to judge marriage ages
const MARRIAGE_AGE_CUTOFF_YEAR: i32 = 1600;

/// Death, burial, lifespan and living-flag consistency
pub(crate) fn check_death(context: &RuleContext<'_>, id: IndividualId, findings: &mut Findings) {
    let tree = context.tree;
    let individual = tree.individual(id);
    let death = individual.death_date();
    if !death.is_known() {
        return;
    }
    let birth = individual.birth_date();
    let burial = individual.burial_date();

    if birth.is_after(death) {
        findings.individual(
            tree,
            id,
            DataErrorCategory::BirthAfterDeath,
            format!("Died {death} before born"),
        );
    }
    if burial.is_known() && birth.is_after(burial) {
        findings.individual(
            tree,
            id,
            DataErrorCategory::BirthAfterDeath,
            format!("Buried {burial} before born"),
        );
    }
    if burial.is_known() && burial.is_before(death) && !burial.overlaps(death) {
        findings.individual(
            tree,
            id,
            DataErrorCategory::BurialBeforeDeath,
            format!("Buried {burial} before died {death}"),
        );
    }
    if individual.min_age_at(death) > context.config.max_age_years {
        findings.individual(
            tree,
            id,
            DataErrorCategory::AgedMoreThan110,
            format!(
                "Aged over {} before died {death}",
                context.config.max_age_years
            ),
        );
    }
    if individual.flagged_as_living {
        findings.individual(
            tree,
            id,
            DataErrorCategory::LivingWithDeathDate,
            format!("Flagged as living but has death date of {death}"),
        );
    }
}

/// Parent ages and deaths around the individual's birth
///
/// Skipped when the birth has no lower bound, e.g. `BEF 1850` or unknown.
pub(crate) fn check_parents(context: &RuleContext<'_>, id: IndividualId, findings: &mut Findings) {
    let tree = context.tree;
    let config = context.config;
    let birth = tree.individual(id).birth_date();
    if birth.start_date() == min_date() {
        return;
    }

    for relationship in tree.individual(id).parental_relationships() {
        let (father, mother) = tree.natural_parents(relationship);

        if let Some(father) = father {
            let father = tree.individual(father);
            if father.min_age_at(birth) > config.father_max_age {
                findings.individual(
                    tree,
                    id,
                    DataErrorCategory::BirthAfterFatherAged90,
                    format!(
                        "Father {} born {} is more than {} yrs old when individual was born",
                        father.name(),
                        father.birth_date(),
                        config.father_max_age
                    ),
                );
            }
            if father.max_age_at(birth) < config.min_parent_age {
                findings.individual(
                    tree,
                    id,
                    DataErrorCategory::BirthBeforeFatherAged13,
                    format!(
                        "Father {} born {} is less than {} yrs old when individual was born",
                        father.name(),
                        father.birth_date(),
                        config.min_parent_age
                    ),
                );
            }
            let father_death = father.death_date();
            if father_death.is_known() && birth.is_known() {
                let conception = birth.subtract_months(config.father_death_grace_months);
                if father_death.is_before(&conception) {
                    findings.individual(
                        tree,
                        id,
                        DataErrorCategory::BirthAfterFatherDeath,
                        format!(
                            "Father {} died {father_death} more than {} months before individual was born",
                            father.name(),
                            config.father_death_grace_months
                        ),
                    );
                }
            }
        }

        if let Some(mother) = mother {
            let mother = tree.individual(mother);
            if mother.min_age_at(birth) > config.mother_max_age {
                findings.individual(
                    tree,
                    id,
                    DataErrorCategory::BirthAfterMotherAged60,
                    format!(
                        "Mother {} born {} is more than {} yrs old when individual was born",
                        mother.name(),
                        mother.birth_date(),
                        config.mother_max_age
                    ),
                );
            }
            if mother.max_age_at(birth) < config.min_parent_age {
                findings.individual(
                    tree,
                    id,
                    DataErrorCategory::BirthBeforeMotherAged13,
                    format!(
                        "Mother {} born {} is less than {} yrs old when individual was born",
                        mother.name(),
                        mother.birth_date(),
                        config.min_parent_age
                    ),
                );
            }
            let mother_death = mother.death_date();
            if mother_death.is_known() && mother_death.is_before(birth) {
                findings.individual(
                    tree,
                    id,
                    DataErrorCategory::BirthAfterMotherDeath,
                    format!(
                        "Mother {} died {mother_death} which is before individual was born",
                        mother.name()
                    ),
                );
            }
        }
    }
}

/// Marriage dates against both spouses' births and deaths
pub(crate) fn check_marriages(
    context: &RuleContext<'_>,
    id: IndividualId,
    findings: &mut Findings,
) {
    let tree = context.tree;
    let min_age = context.config.min_parent_age;
    let cutoff = FactDate::from_year(MARRIAGE_AGE_CUTOFF_YEAR);
    let individual = tree.individual(id);

    for family_id in individual.families_as_spouse() {
        let family = tree.family(*family_id);
        let marriage = family.marriage_date();
        let Some(spouse) = family.spouse_of(id).map(|s| tree.individual(s)) else {
            continue;
        };
        if !marriage.is_known() {
            continue;
        }

        if marriage.is_after(individual.death_date()) {
            findings.individual(
                tree,
                id,
                DataErrorCategory::MarriageAfterDeath,
                format!(
                    "Marriage to {} in {marriage} is after individual died {}",
                    spouse.name(),
                    individual.death_date()
                ),
            );
        }
        if marriage.is_after(spouse.death_date()) {
            findings.individual(
                tree,
                id,
                DataErrorCategory::MarriageAfterSpouseDead,
                format!(
                    "Marriage to {} in {marriage} is after spouse died {}",
                    spouse.name(),
                    spouse.death_date()
                ),
            );
        }
        if individual.max_age_at(marriage) < min_age && individual.birth_date().is_after(&cutoff) {
            findings.individual(
                tree,
                id,
                DataErrorCategory::MarriageBefore13,
                format!(
                    "Marriage to {} in {marriage} is before individual was {min_age} years old",
                    spouse.name()
                ),
            );
        }
        if spouse.max_age_at(marriage) < min_age && spouse.birth_date().is_after(&cutoff) {
            findings.individual(
                tree,
                id,
                DataErrorCategory::MarriageBeforeSpouse13,
                format!(
                    "Marriage to {} in {marriage} is before spouse born {} was {min_age} years old",
                    spouse.name(),
                    spouse.birth_date()
                ),
            );
        }
    }
}
