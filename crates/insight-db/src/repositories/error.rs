//! Error handling utilities for repositories

use insight_core::error::DomainError;
use insight_core::value_objects::InsightId;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    map_db_error(e)
}

/// Map a write against `reactions` whose insight row is missing
pub fn map_reaction_write_error(e: SqlxError, insight_id: InsightId) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return insight_not_found(insight_id);
        }
    }
    map_unique_violation(e, || DomainError::ReactionAlreadyExists)
}

/// Create an "insight not found" error
pub fn insight_not_found(id: InsightId) -> DomainError {
    DomainError::InsightNotFound(id)
}
