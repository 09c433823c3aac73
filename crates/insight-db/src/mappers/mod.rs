//! Entity to model mappers
//!
//! Conversions between domain entities (insight-core) and database models.
//! - `TryFrom<Model> for Entity`: rows whose enumerated columns fail to parse
//!   are reported as database errors, never coerced
//! - `*Insert` structs: prepare entity data for database operations

mod contributor;
mod insight;
mod reaction;

use insight_core::error::DomainError;

pub use reaction::{counts_from_models, reactions_from_models, ReactionInsert};

/// A stored value outside the recognized set
pub(crate) fn corrupt_row(column: &str, value: &str) -> DomainError {
    DomainError::DatabaseError(format!("unrecognized value '{value}' in {column}"))
}
