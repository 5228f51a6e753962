//! Person graph context
//!
//! `FamilyTree` is the explicit graph every pass operates on. It is built
//! once by `FamilyTreeBuilder` from loader records.

pub mod builder;
pub mod tree;

pub use builder::{ChildRecord, FamilyRecord, FamilyTreeBuilder};
pub use tree::FamilyTree;
