//! Relationship classification
//!
//! A breadth-first, multi-phase walk from a chosen root person that places
//! every individual in exactly one relationship class and numbers the
//! root's direct ancestors with Ahnentafel numbers (root 1, father 2n,
//! mother 2n+1).
//!
//! Phases run strictly in order:
//! 1. seed the root,
//! 2. walk natural parents to find direct ancestors,
//! 3. derive budgie codes for direct ancestors,
//! 4. spread blood relations down from every direct ancestor and mark
//!    their spouses,
//! 5. upgrade the root's own descendants,
//! 6. follow chains of marriages,
//! 7. link anyone sharing a family with a classified person, to a fixed point.

use crate::algorithm::relationship::description::{self, generation};
use crate::algorithm::relationship::summary::RelationSummary;
use crate::config::ClassifierConfig;
use crate::error::{KinshipError, Result};
use crate::graph::FamilyTree;
use crate::graph::tree::digit_count;
use crate::models::ids::IndividualId;
use crate::models::individual::CommonAncestor;
use crate::models::types::RelationType;
use itertools::Itertools;
use log::{debug, info, warn};
use rustc_hash::FxHashSet;
use serde::Serialize;
use smallvec::SmallVec;
use std::collections::VecDeque;

/// A person reachable as a direct ancestor through two lineage paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AncestorConflict {
    /// The ancestor found twice
    #[serde(skip)]
    pub individual: IndividualId,
    /// Source identifier of the ancestor
    pub individual_id: String,
    /// Ahnentafel number kept, the lower of the two
    pub kept: u128,
    /// Ahnentafel number discarded
    pub discarded: u128,
    /// Both ancestry lines as text
    pub message: String,
}

/// Outcome of a classification run
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReport {
    /// Root person the classification is relative to
    #[serde(skip)]
    pub root: IndividualId,
    /// Largest Ahnentafel number assigned
    pub max_ahnentafel: u128,
    /// Multi-path ancestor conflicts found in the direct-ancestor phase
    pub conflicts: Vec<AncestorConflict>,
    /// Number of individuals in each class
    pub summary: RelationSummary,
}

/// Classifies every individual relative to a root person
#[derive(Debug, Clone, Default)]
pub struct RelationshipClassifier {
    config: ClassifierConfig,
}

impl RelationshipClassifier {
    /// Create a classifier with the given settings
    #[must_use]
    pub const fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify the whole tree relative to `root_id`
    ///
    /// Any previous classification is cleared first. Afterwards every
    /// individual carries a relation type, direct ancestors carry an
    /// Ahnentafel number and budgie code, and relatives carry a kinship
    /// description.
    ///
    /// # Arguments
    /// * `tree` - Tree to classify in place
    /// * `root_id` - Source identifier of the root person
    ///
    /// # Errors
    /// * `EmptyTree` if the tree holds no individuals
    /// * `RootNotFound` if `root_id` is not in the tree
    pub fn classify(&self, tree: &mut FamilyTree, root_id: &str) -> Result<ClassificationReport> {
        if tree.is_empty() {
            return Err(KinshipError::EmptyTree);
        }
        let root = tree
            .find_individual(root_id)
            .ok_or_else(|| KinshipError::RootNotFound(root_id.to_string()))?;
        info!(
            "Setting relations relative to {} ({})",
            tree.individual(root).name(),
            root_id
        );

        for id in tree.individual_ids() {
            tree.individual_mut(id).clear_relations();
        }

        let (max_ahnentafel, mut conflicts) = mark_direct_ancestors(tree, root);
        assign_budgie_codes(tree, max_ahnentafel);
        propagate_blood(tree);
        mark_descendants(tree, root);
        propagate_marriages(tree);
        let linked_passes = close_linked(tree);
        debug!("Linked closure settled after {linked_passes} passes");
        description::set_relation_descriptions(tree, root);

        let summary = RelationSummary::from_tree(tree);
        info!("Relationship classification complete\n{summary}");
        if !conflicts.is_empty() {
            info!("Found {} multi-path ancestor conflicts", conflicts.len());
        }
        if !self.config.record_conflicts {
            conflicts.clear();
        }

        Ok(ClassificationReport {
            root,
            max_ahnentafel,
            conflicts,
            summary,
        })
    }
}

/// Walk natural parents breadth first from the root, numbering ancestors
///
/// The first path to reach a parent claims its number. A second path with
/// a different number is a conflict; the lower number is kept and, when it
/// wins, the parent is walked again so its own ancestors follow it. Those
/// follow-on renumberings are not reported separately.
fn mark_direct_ancestors(
    tree: &mut FamilyTree,
    root: IndividualId,
) -> (u128, Vec<AncestorConflict>) {
    let root_ind = tree.individual_mut(root);
    root_ind.set_relation_type(RelationType::Direct);
    root_ind.ahnentafel = 1;

    let mut max_ahnentafel = 1u128;
    let mut conflicts = Vec::new();
    let mut overflowed = 0usize;
    let mut queue = VecDeque::from([(root, false)]);

    while let Some((ind, renumbering)) = queue.pop_front() {
        let number = tree.individual(ind).ahnentafel;
        tree.individual_mut(ind).common_ancestor = Some(CommonAncestor {
            ancestor: ind,
            distance: 0,
            step: false,
        });

        let mut parents: SmallVec<[(IndividualId, Option<u128>); 2]> = SmallVec::new();
        for relationship in tree.individual(ind).parental_relationships() {
            let (father, mother) = tree.natural_parents(relationship);
            if let Some(father) = father {
                parents.push((father, number.checked_mul(2)));
            }
            if let Some(mother) = mother {
                parents.push((mother, number.checked_mul(2).and_then(|n| n.checked_add(1))));
            }
        }

        for (parent, candidate) in parents {
            let Some(candidate) = candidate else {
                overflowed += 1;
                continue;
            };
            let existing = tree.individual(parent).ahnentafel;
            if existing == 0 {
                let parent_ind = tree.individual_mut(parent);
                parent_ind.ahnentafel = candidate;
                parent_ind.set_relation_type(RelationType::Direct);
                max_ahnentafel = max_ahnentafel.max(candidate);
                queue.push_back((parent, renumbering));
            } else if existing != candidate {
                let kept = existing.min(candidate);
                if !renumbering {
                    conflicts.push(conflict(tree, parent, kept, existing.max(candidate)));
                }
                if candidate < existing {
                    tree.individual_mut(parent).ahnentafel = candidate;
                    queue.push_back((parent, true));
                }
            }
        }
    }

    if overflowed > 0 {
        warn!(
            "Skipped {overflowed} ancestors whose Ahnentafel number would exceed 128 bits"
        );
    }
    let directs = tree
        .individuals()
        .filter(|(_, ind)| ind.relation_type() == RelationType::Direct)
        .count();
    info!("Found {directs} direct ancestors including the root");
    (max_ahnentafel, conflicts)
}

fn conflict(tree: &FamilyTree, parent: IndividualId, kept: u128, discarded: u128) -> AncestorConflict {
    let individual = tree.individual(parent);
    let message = format!(
        "{} detected as a direct ancestor more than once as:\n{} and as:\n{}",
        individual.name(),
        description::ancestor_line(discarded),
        description::ancestor_line(kept)
    );
    warn!("{message}");
    AncestorConflict {
        individual: parent,
        individual_id: individual.id().to_string(),
        kept,
        discarded,
        message,
    }
}

/// Zero-padded Ahnentafel number plus `d` for every direct ancestor
fn assign_budgie_codes(tree: &mut FamilyTree, max_ahnentafel: u128) {
    let width = digit_count(max_ahnentafel);
    let directs = tree
        .individuals()
        .filter(|(_, ind)| ind.relation_type() == RelationType::Direct && ind.ahnentafel() > 0)
        .map(|(id, _)| id)
        .collect_vec();
    for id in directs {
        let individual = tree.individual_mut(id);
        individual.budgie_code = format!("{:0width$}d", individual.ahnentafel);
    }
}

/// Rank of a common-ancestor marker, smaller is a closer relationship
///
/// Generations up to the ancestor plus generations down from it, then the
/// ancestor's Ahnentafel number.
fn ancestor_rank(tree: &FamilyTree, marker: &CommonAncestor) -> (u32, u128) {
    let number = tree.individual(marker.ancestor).ahnentafel();
    (generation(number) + marker.distance, number)
}

/// Spread blood relations down from every direct ancestor
///
/// Spouses of a direct or blood individual become married-to-blood and
/// children become blood relatives. Each child inherits its parent's
/// common-ancestor marker one generation further away; a better marker
/// replaces a worse one and is passed on again.
fn propagate_blood(tree: &mut FamilyTree) {
    let mut queue: VecDeque<IndividualId> = tree
        .individuals()
        .filter(|(_, ind)| ind.relation_type() == RelationType::Direct)
        .sorted_by_key(|(_, ind)| ind.ahnentafel())
        .map(|(id, _)| id)
        .collect();
    let mut queued: FxHashSet<IndividualId> = queue.iter().copied().collect();

    while let Some(ind) = queue.pop_front() {
        queued.remove(&ind);
        let parent_marker = tree.individual(ind).common_ancestor();
        let families = tree.individual(ind).families_as_spouse().to_vec();

        for family_id in families {
            let family = tree.family(family_id);
            let spouse = family.spouse_of(ind);
            let is_husband = family.husband() == Some(ind);
            let children = family.children().to_vec();

            if let Some(spouse) = spouse {
                tree.individual_mut(spouse)
                    .set_relation_type(RelationType::MarriedToDirectOrBlood);
            }

            for (position, child) in children.into_iter().enumerate() {
                let child_ind = tree.individual(child);
                if child_ind.relation_type() == RelationType::Direct {
                    continue;
                }
                let natural = child_ind
                    .parental_relationships()
                    .iter()
                    .find(|rel| rel.family == family_id)
                    .is_some_and(|rel| {
                        if is_husband {
                            rel.natural_father
                        } else {
                            rel.natural_mother
                        }
                    });

                let improved = match parent_marker {
                    Some(marker) => {
                        let candidate = CommonAncestor {
                            ancestor: marker.ancestor,
                            distance: marker.distance + 1,
                            step: marker.step || !natural,
                        };
                        let better = child_ind.common_ancestor().is_none_or(|current| {
                            ancestor_rank(tree, &candidate) < ancestor_rank(tree, &current)
                        });
                        if better {
                            tree.individual_mut(child).common_ancestor = Some(candidate);
                        }
                        better
                    }
                    None => false,
                };

                let child_ind = tree.individual_mut(child);
                let newly_blood = child_ind.set_relation_type(RelationType::Blood);
                if child_ind.budgie_code.is_empty() {
                    child_ind.budgie_code = format!("-{:02}c", position + 1);
                }
                if (newly_blood || improved) && queued.insert(child) {
                    queue.push_back(child);
                }
            }
        }
    }
}

/// Upgrade the root's natural descendants from blood to descendant
fn mark_descendants(tree: &mut FamilyTree, root: IndividualId) {
    let descendants = crate::algorithm::relationship::lineage::descendants(tree, root);
    for id in &descendants {
        tree.individual_mut(*id)
            .set_relation_type(RelationType::Descendant);
    }
    debug!("Marked {} descendants of the root", descendants.len());
}

/// Follow chains of marriages out from the married-to-blood spouses
///
/// Parents, spouses and children of anyone reached this way are related by
/// marriage unless already classified.
fn propagate_marriages(tree: &mut FamilyTree) {
    let mut queue: VecDeque<IndividualId> = tree
        .individuals()
        .filter(|(_, ind)| ind.relation_type() == RelationType::MarriedToDirectOrBlood)
        .map(|(id, _)| id)
        .collect();

    while let Some(ind) = queue.pop_front() {
        let relation = tree.individual(ind).relation_type();
        if !matches!(
            relation,
            RelationType::Marriage | RelationType::MarriedToDirectOrBlood | RelationType::Unknown
        ) {
            continue;
        }
        tree.individual_mut(ind)
            .set_relation_type(RelationType::Marriage);

        // In-laws: parents still unknown are promoted when dequeued
        for relationship in tree.individual(ind).parental_relationships() {
            let family = tree.family(relationship.family);
            for parent in [family.husband(), family.wife()].into_iter().flatten() {
                if tree.individual(parent).relation_type() == RelationType::Unknown {
                    queue.push_back(parent);
                }
            }
        }

        for family_id in tree.individual(ind).families_as_spouse().to_vec() {
            let family = tree.family(family_id);
            let touched = family
                .spouse_of(ind)
                .into_iter()
                .chain(family.children().iter().copied())
                .collect::<SmallVec<[IndividualId; 8]>>();
            for other in touched {
                let other_ind = tree.individual_mut(other);
                if other_ind.relation_type() == RelationType::Unknown
                    && other_ind.set_relation_type(RelationType::Marriage)
                {
                    queue.push_back(other);
                }
            }
        }
    }
}

/// Link unknown members of any family that has a classified member
///
/// Repeats until a full pass changes nothing and returns the pass count.
fn close_linked(tree: &mut FamilyTree) -> usize {
    let mut passes = 0;
    loop {
        passes += 1;
        let mut to_link: Vec<IndividualId> = Vec::new();
        for (_, family) in tree.families() {
            let members = family.members();
            let mut unknown = members
                .iter()
                .copied()
                .filter(|m| tree.individual(*m).relation_type() == RelationType::Unknown)
                .peekable();
            if unknown.peek().is_none() {
                continue;
            }
            let any_classified = members
                .iter()
                .any(|m| tree.individual(*m).relation_type().is_classified());
            if any_classified {
                to_link.extend(unknown);
            }
        }
        if to_link.is_empty() {
            return passes;
        }
        for id in to_link {
            tree.individual_mut(id).set_relation_type(RelationType::Linked);
        }
    }
}
