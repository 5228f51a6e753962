//! Lineage queries over the family graph
//!
//! Ancestor and descendant walks follow natural parent links only. The
//! family and component queries follow every spouse, parent and child link.

use crate::graph::FamilyTree;
use crate::models::ids::IndividualId;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Whether `child` is a natural child of `parent`
#[must_use]
pub fn is_natural_child(tree: &FamilyTree, parent: IndividualId, child: IndividualId) -> bool {
    tree.individual(child)
        .parental_relationships()
        .iter()
        .any(|rel| {
            let (father, mother) = tree.natural_parents(rel);
            father == Some(parent) || mother == Some(parent)
        })
}

/// Natural children of an individual across all their families
#[must_use]
pub fn natural_children(tree: &FamilyTree, parent: IndividualId) -> Vec<IndividualId> {
    let mut seen = FxHashSet::default();
    tree.individual(parent)
        .families_as_spouse()
        .iter()
        .flat_map(|family| tree.family(*family).children())
        .copied()
        .filter(|child| is_natural_child(tree, parent, *child) && seen.insert(*child))
        .collect()
}

/// Every natural ancestor, nearest generation first
///
/// The individual itself is excluded even if the data loops back to it.
#[must_use]
pub fn ancestors(tree: &FamilyTree, id: IndividualId) -> Vec<IndividualId> {
    breadth_first(tree, id, |tree, current| {
        tree.individual(current)
            .parental_relationships()
            .iter()
            .flat_map(|rel| {
                let (father, mother) = tree.natural_parents(rel);
                father.into_iter().chain(mother)
            })
            .collect()
    })
}

/// Every natural descendant, nearest generation first
#[must_use]
pub fn descendants(tree: &FamilyTree, id: IndividualId) -> Vec<IndividualId> {
    breadth_first(tree, id, natural_children)
}

/// Parents, spouses, children and siblings, natural or not
#[must_use]
pub fn immediate_family(tree: &FamilyTree, id: IndividualId) -> Vec<IndividualId> {
    let individual = tree.individual(id);
    let mut seen = FxHashSet::from_iter([id]);
    let mut family_members = Vec::new();

    for rel in individual.parental_relationships() {
        let family = tree.family(rel.family);
        let parents = family.husband().into_iter().chain(family.wife());
        for member in parents.chain(family.children().iter().copied()) {
            if seen.insert(member) {
                family_members.push(member);
            }
        }
    }
    for family_id in individual.families_as_spouse() {
        for member in tree.family(*family_id).members() {
            if seen.insert(member) {
                family_members.push(member);
            }
        }
    }
    family_members
}

/// Everyone connected to the individual through any chain of spouse, parent
/// or child links, the individual included
#[must_use]
pub fn all_relations(tree: &FamilyTree, id: IndividualId) -> Vec<IndividualId> {
    let mut related = vec![id];
    related.extend(breadth_first(tree, id, immediate_family));
    related
}

fn breadth_first<F>(tree: &FamilyTree, start: IndividualId, next: F) -> Vec<IndividualId>
where
    F: Fn(&FamilyTree, IndividualId) -> Vec<IndividualId>,
{
    let mut visited = FxHashSet::from_iter([start]);
    let mut queue = VecDeque::from([start]);
    let mut found = Vec::new();
    while let Some(current) = queue.pop_front() {
        for neighbour in next(tree, current) {
            if visited.insert(neighbour) {
                found.push(neighbour);
                queue.push_back(neighbour);
            }
        }
    }
    found
}
