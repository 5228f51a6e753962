//! Domain models for the person graph
//!
//! Individuals, families and their facts, plus the records produced by the
//! analysis passes.

pub mod data_error;
pub mod duplicate;
pub mod fact;
pub mod fact_date;
pub mod family;
pub mod ids;
pub mod individual;
pub mod location;
pub mod types;

pub use data_error::{DataError, DataErrorCategory, DataErrorGroup, ErrorEntity, Severity};
pub use duplicate::{DuplicateIndividual, DuplicateRecord};
pub use fact::{Fact, FactError, FactErrorLevel, FactType};
pub use fact_date::{FactDate, FactDateType};
pub use family::{Family, ParentalRelationship};
pub use ids::{FamilyId, IndividualId};
pub use individual::{CommonAncestor, Individual, UNKNOWN_NAME};
pub use location::{FactLocation, LocationLevel};
pub use types::{Gender, MaritalStatus, RelationType};
