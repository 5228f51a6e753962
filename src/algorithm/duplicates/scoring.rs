//! Pairwise duplicate scoring
//!
//! A pair's score is the unclamped sum of independent signals: names, birth
//! and death dates, birth location, and whether the recorded parents rule
//! the pair out. Point values are fixed so scores stay comparable between
//! runs and trees.

use crate::algorithm::duplicates::grouping::CandidateIndex;
use crate::algorithm::duplicates::phonetic::PhoneticEncoder;
use crate::graph::FamilyTree;
use crate::models::fact_date::FactDate;
use crate::models::ids::IndividualId;
use crate::models::individual::{Individual, UNKNOWN_NAME};
use crate::models::location::{FactLocation, LocationLevel};

/// Points for an equal surname or an equal forename
pub const NAME_MATCH: i32 = 20;
/// Points when both dates are exact
pub const EXACT_DATES: i32 = 100;
/// Points for identical dates
pub const EQUAL_DATES: i32 = 50;
/// Penalty when both countries are recognised and differ
pub const DIFFERENT_COUNTRY: i32 = -250;
/// Penalty when both have one set of fully known, entirely different parents
pub const DIFFERENT_PARENTS: i32 = -500;
/// Penalty when parent families are recorded but share nothing
pub const NO_SHARED_PARENTS: i32 = -250;
/// Points for the same parent in both parent families
pub const SAME_PARENT: i32 = 50;

/// Bonus points per location level: phonetic match, then literal match
const LOCATION_POINTS: [(LocationLevel, i32, i32); 5] = [
    (LocationLevel::Country, 5, 10),
    (LocationLevel::Region, 5, 10),
    (LocationLevel::SubRegion, 10, 20),
    (LocationLevel::Address, 20, 40),
    (LocationLevel::Place, 20, 40),
];

/// Extra points when the whole location matches and the countries sound alike
const WHOLE_LOCATION: i32 = 75;

fn known_name(name: &str) -> Option<&str> {
    (!name.is_empty() && name != UNKNOWN_NAME).then_some(name)
}

/// Name signal: 20 for the same surname, 20 for the same first forename
///
/// Placeholder names never count in either direction.
#[must_use]
pub fn name_score(a: &Individual, b: &Individual) -> i32 {
    let mut score = 0;
    if let (Some(x), Some(y)) = (known_name(a.surname()), known_name(b.surname())) {
        if x == y {
            score += NAME_MATCH;
        }
    }
    if let (Some(x), Some(y)) = (known_name(a.forename()), known_name(b.forename())) {
        if x == y {
            score += NAME_MATCH;
        }
    }
    score
}

/// Date signal for one pair of dates
///
/// Both exact adds 100, identical adds 50. Otherwise the squared distance in
/// years decides: beyond 400 the score becomes -1000, beyond 25 it becomes
/// minus the squared distance, and closer dates earn 50/20/10/5 by squared
/// quarter-year bands below 1, 4, 16 and 64. Unknown dates score 0.
#[must_use]
pub fn date_score(a: &FactDate, b: &FactDate) -> i32 {
    if !a.is_known() || !b.is_known() {
        return 0;
    }
    let mut score = 0;
    if a.is_exact() && b.is_exact() {
        score += EXACT_DATES;
    }
    if a == b {
        return score + EQUAL_DATES;
    }

    let distance_squared = a.distance_squared(b);
    if distance_squared > 400.0 {
        return -1000;
    }
    if distance_squared > 25.0 {
        return -(distance_squared as i32);
    }
    let quarters_squared = distance_squared * 16.0;
    score
        + if quarters_squared < 1.0 {
            50
        } else if quarters_squared < 4.0 {
            20
        } else if quarters_squared < 16.0 {
            10
        } else if quarters_squared < 64.0 {
            5
        } else {
            0
        }
}

/// Location signal for two birth locations
///
/// Each level scores when the parts sound alike and again when they are
/// literally equal, so levels missing on both sides still score. A blank
/// location scores nothing.
#[must_use]
pub fn location_score(encoder: &dyn PhoneticEncoder, a: &FactLocation, b: &FactLocation) -> i32 {
    if a.is_blank() || b.is_blank() {
        return 0;
    }
    let mut score = 0;
    for (level, sounds_alike, literal) in LOCATION_POINTS {
        let (x, y) = (a.part(level), b.part(level));
        if encoder.encode(x) != encoder.encode(y) {
            continue;
        }
        score += sounds_alike;
        if x == y {
            score += literal;
        }
        if level == LocationLevel::Country && a == b {
            score += WHOLE_LOCATION;
        }
    }
    if a.is_known_country() && b.is_known_country() && a.country != b.country {
        score += DIFFERENT_COUNTRY;
    }
    score
}

/// Overlap between the parent families of two individuals
///
/// Every pair of parent families adds 50 for the same father, or the name
/// score of the two fathers when they differ, and the same for mothers.
#[must_use]
pub fn shared_parents(tree: &FamilyTree, a: IndividualId, b: IndividualId) -> i32 {
    let mut score = 0;
    for left in tree.individual(a).parental_relationships() {
        let left = tree.family(left.family);
        for right in tree.individual(b).parental_relationships() {
            let right = tree.family(right.family);
            for (x, y) in [
                (left.husband(), right.husband()),
                (left.wife(), right.wife()),
            ] {
                score += match (x, y) {
                    (Some(x), Some(y)) if x == y => SAME_PARENT,
                    (Some(x), Some(y)) => name_score(tree.individual(x), tree.individual(y)),
                    _ => 0,
                };
            }
        }
    }
    score
}

/// Parentage signal
///
/// Two individuals each with exactly one parent family, all four natural
/// parents known and neither father nor mother in common, score -500. When
/// both have parent families otherwise, sharing nothing at all scores -250.
#[must_use]
pub fn different_parents_penalty(tree: &FamilyTree, a: IndividualId, b: IndividualId) -> i32 {
    let left = tree.individual(a).parental_relationships();
    let right = tree.individual(b).parental_relationships();
    match (left, right) {
        ([left], [right]) => {
            let (left_father, left_mother) = tree.natural_parents(left);
            let (right_father, right_mother) = tree.natural_parents(right);
            match (left_father, left_mother, right_father, right_mother) {
                (Some(lf), Some(lm), Some(rf), Some(rm)) if lf != rf && lm != rm => {
                    DIFFERENT_PARENTS
                }
                _ => 0,
            }
        }
        (left, right) if !left.is_empty() && !right.is_empty() => {
            if shared_parents(tree, a, b) == 0 {
                NO_SHARED_PARENTS
            } else {
                0
            }
        }
        _ => 0,
    }
}

/// Whether the two share a father or a mother in any parent family
#[must_use]
pub fn is_twins(tree: &FamilyTree, a: IndividualId, b: IndividualId) -> bool {
    let left = tree.individual(a).parental_relationships();
    let right = tree.individual(b).parental_relationships();
    left.iter().any(|l| {
        let l = tree.family(l.family);
        right.iter().any(|r| {
            let r = tree.family(r.family);
            (l.husband().is_some() && l.husband() == r.husband())
                || (l.wife().is_some() && l.wife() == r.wife())
        })
    })
}

/// Scores pairs of individuals from one tree
pub struct PairScorer<'a> {
    tree: &'a FamilyTree,
    encoder: &'a dyn PhoneticEncoder,
    eligibility_distance_squared: f64,
}

impl<'a> PairScorer<'a> {
    /// Create a scorer
    ///
    /// # Arguments
    /// * `tree` - Tree the individuals belong to
    /// * `encoder` - Phonetic encoder used for location parts
    /// * `eligibility_distance_squared` - Birth dates this far apart or more
    ///   in years² are never compared
    #[must_use]
    pub fn new(
        tree: &'a FamilyTree,
        encoder: &'a dyn PhoneticEncoder,
        eligibility_distance_squared: f64,
    ) -> Self {
        Self {
            tree,
            encoder,
            eligibility_distance_squared,
        }
    }

    /// Whether a pair from the same surname group is worth scoring
    ///
    /// Genders must be compatible, both names usable, forenames alike by
    /// sound or by standardised form, and birth dates close.
    #[must_use]
    pub fn is_eligible(&self, index: &CandidateIndex, a: IndividualId, b: IndividualId) -> bool {
        let (Some(keys_a), Some(keys_b)) = (index.keys(a), index.keys(b)) else {
            return false;
        };
        let left = self.tree.individual(a);
        let right = self.tree.individual(b);
        if !left.gender_matches(right) || left.has_unknown_name() || right.has_unknown_name() {
            return false;
        }
        let forenames_alike = (!keys_a.forename.is_empty() && keys_a.forename == keys_b.forename)
            || keys_a.standardised == keys_b.standardised;
        forenames_alike
            && left.birth_date().distance_squared(right.birth_date())
                < self.eligibility_distance_squared
    }

    /// Total score of a pair
    #[must_use]
    pub fn score(&self, a: IndividualId, b: IndividualId) -> i32 {
        let left = self.tree.individual(a);
        let right = self.tree.individual(b);
        name_score(left, right)
            + date_score(left.birth_date(), right.birth_date())
            + date_score(left.death_date(), right.death_date())
            + location_score(self.encoder, left.birth_location(), right.birth_location())
            + different_parents_penalty(self.tree, a, b)
    }
}
