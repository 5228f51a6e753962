//! Human-readable kinship descriptions
//!
//! Direct ancestors are described from their Ahnentafel number alone. Blood
//! relatives and descendants are described from their common ancestor with
//! the root: how many generations the ancestor is above the root (`up`) and
//! how many the relative is below the ancestor (`down`).

use crate::graph::FamilyTree;
use crate::models::ids::IndividualId;
use crate::models::types::{Gender, RelationType};
use itertools::Itertools;

/// Generation of an Ahnentafel number, the root being generation 0
#[must_use]
pub const fn generation(ahnentafel: u128) -> u32 {
    if ahnentafel <= 1 {
        0
    } else {
        u128::BITS - 1 - ahnentafel.leading_zeros()
    }
}

/// English ordinal such as `1st`, `2nd`, `11th`, `23rd`
#[must_use]
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

fn gendered(gender: Gender, male: &str, female: &str, neutral: &str) -> String {
    match gender {
        Gender::Male => male,
        Gender::Female => female,
        Gender::Unknown => neutral,
    }
    .to_string()
}

/// Description of the direct ancestor holding an Ahnentafel number
///
/// Even numbers are fathers and odd numbers mothers, so the number alone
/// decides the wording.
///
/// # Examples
/// `2` is `father`, `13` is `great-grandmother`, `16` is
/// `2nd great-grandfather`.
#[must_use]
pub fn direct_description(ahnentafel: u128) -> String {
    let generation = generation(ahnentafel);
    if generation == 0 {
        return "root person".to_string();
    }
    let base = if ahnentafel % 2 == 0 { "father" } else { "mother" };
    match generation {
        1 => base.to_string(),
        2 => format!("grand{base}"),
        3 => format!("great-grand{base}"),
        g => format!("{} great-grand{base}", ordinal(g - 2)),
    }
}

/// Description of an Ahnentafel number with the number itself, used in
/// conflict messages
#[must_use]
pub fn ancestor_line(ahnentafel: u128) -> String {
    format!("{} (Ahnentafel {ahnentafel})", direct_description(ahnentafel))
}

fn times_removed(removed: u32) -> String {
    match removed {
        0 => String::new(),
        1 => " once removed".to_string(),
        2 => " twice removed".to_string(),
        n => format!(" {n} times removed"),
    }
}

/// Kinship between the root and a relative sharing a common ancestor
///
/// # Arguments
/// * `up` - Generations from the root up to the common ancestor
/// * `down` - Generations from the common ancestor down to the relative
/// * `gender` - Gender of the relative
/// * `step` - Whether the path includes a non-natural parent link
#[must_use]
pub fn kinship(up: u32, down: u32, gender: Gender, step: bool) -> String {
    let text = match (up, down) {
        (0, 0) => "root person".to_string(),
        (0, 1) => gendered(gender, "son", "daughter", "child"),
        (0, 2) => gendered(gender, "grandson", "granddaughter", "grandchild"),
        (0, 3) => gendered(gender, "great-grandson", "great-granddaughter", "great-grandchild"),
        (0, d) => format!(
            "{} {}",
            ordinal(d - 2),
            gendered(gender, "great-grandson", "great-granddaughter", "great-grandchild")
        ),
        (u, 0) => direct_description(1u128.checked_shl(u).unwrap_or(u128::MAX)),
        (1, 1) => gendered(gender, "brother", "sister", "sibling"),
        (2, 1) => gendered(gender, "uncle", "aunt", "uncle/aunt"),
        (3, 1) => gendered(gender, "great-uncle", "great-aunt", "great-uncle/aunt"),
        (u, 1) => format!(
            "{} {}",
            ordinal(u - 2),
            gendered(gender, "great-uncle", "great-aunt", "great-uncle/aunt")
        ),
        (1, 2) => gendered(gender, "nephew", "niece", "nephew/niece"),
        (1, 3) => gendered(gender, "grandnephew", "grandniece", "grandnephew/niece"),
        (1, 4) => gendered(
            gender,
            "great-grandnephew",
            "great-grandniece",
            "great-grandnephew/niece",
        ),
        (1, d) => format!(
            "{} {}",
            ordinal(d - 3),
            gendered(
                gender,
                "great-grandnephew",
                "great-grandniece",
                "great-grandnephew/niece"
            )
        ),
        (u, d) => {
            let degree = u.min(d) - 1;
            format!("{} cousin{}", ordinal(degree), times_removed(u.abs_diff(d)))
        }
    };
    if step {
        format!("step-{text}")
    } else {
        text
    }
}

/// Description of one individual relative to the root, without spouses
fn blood_description(tree: &FamilyTree, root: IndividualId, id: IndividualId) -> String {
    if id == root {
        return "root person".to_string();
    }
    let individual = tree.individual(id);
    if individual.relation_type() == RelationType::Direct {
        return direct_description(individual.ahnentafel());
    }
    let Some(marker) = individual.common_ancestor() else {
        return String::new();
    };
    let up = generation(tree.individual(marker.ancestor).ahnentafel());
    kinship(up, marker.distance, individual.gender, marker.step)
}

/// Write `relation_to_root` for every individual
///
/// Blood relatives are described first so that spouses of blood relatives
/// can refer to them.
pub(crate) fn set_relation_descriptions(tree: &mut FamilyTree, root: IndividualId) {
    let blood = tree
        .individuals()
        .filter(|(_, ind)| {
            matches!(
                ind.relation_type(),
                RelationType::Direct | RelationType::Descendant | RelationType::Blood
            )
        })
        .map(|(id, _)| id)
        .collect_vec();
    for id in blood {
        let text = blood_description(tree, root, id);
        tree.individual_mut(id).relation_to_root = text;
    }

    let others = tree
        .individuals()
        .filter(|(_, ind)| {
            !matches!(
                ind.relation_type(),
                RelationType::Direct | RelationType::Descendant | RelationType::Blood
            )
        })
        .map(|(id, _)| id)
        .collect_vec();
    for id in others {
        let text = spouse_description(tree, id)
            .unwrap_or_else(|| tree.individual(id).relation_type().label().to_string());
        tree.individual_mut(id).relation_to_root = text;
    }
}

/// `husband of …`, `wife of …` or `partner of …` for the first spouse who is
/// a blood relative of the root
fn spouse_description(tree: &FamilyTree, id: IndividualId) -> Option<String> {
    let individual = tree.individual(id);
    if individual.relation_type() != RelationType::MarriedToDirectOrBlood {
        return None;
    }
    individual.families_as_spouse().iter().find_map(|family_id| {
        let family = tree.family(*family_id);
        let spouse = family.spouse_of(id)?;
        let spouse_ind = tree.individual(spouse);
        if !matches!(
            spouse_ind.relation_type(),
            RelationType::Direct | RelationType::Descendant | RelationType::Blood
        ) {
            return None;
        }
        let role = if !family.is_married() {
            "partner"
        } else if family.husband() == Some(id) {
            "husband"
        } else {
            "wife"
        };
        Some(format!("{role} of {}", spouse_ind.relation_to_root()))
    })
}
