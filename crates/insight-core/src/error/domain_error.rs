//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{ActorId, IdParseError, InsightId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Insight not found: {0}")]
    InsightNotFound(InsightId),

    #[error("Reaction not found for actor {actor_id} on insight {insight_id}")]
    ReactionNotFound {
        insight_id: InsightId,
        actor_id: ActorId,
    },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Unknown reaction type: {0}")]
    UnknownReactionType(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    /// Raised by stores on a unique `(insight, actor)` violation; the toggle
    /// path treats it as control flow and never surfaces it.
    #[error("Reaction already exists")]
    ReactionAlreadyExists,

    // =========================================================================
    // Consistency Errors
    // =========================================================================
    #[error("Reaction aggregate drifted for insight {0}")]
    AggregateDrift(InsightId),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Operation timed out after {0} ms; outcome unknown")]
    OperationTimedOut(u64),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::InsightNotFound(_) => "UNKNOWN_INSIGHT",
            Self::ReactionNotFound { .. } => "UNKNOWN_REACTION",

            // Validation
            Self::UnknownReactionType(_) => "UNKNOWN_REACTION_TYPE",
            Self::ValidationError(_) => "VALIDATION_ERROR",

            // Conflict
            Self::ReactionAlreadyExists => "REACTION_ALREADY_EXISTS",

            // Consistency
            Self::AggregateDrift(_) => "AGGREGATE_DRIFT",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::OperationTimedOut(_) => "OUTCOME_UNKNOWN",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::InsightNotFound(_) | Self::ReactionNotFound { .. }
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownReactionType(_) | Self::ValidationError(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ReactionAlreadyExists)
    }

    /// Backing store failure or timeout; safe to retry with backoff after
    /// re-reading current state
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::DatabaseError(_) | Self::OperationTimedOut(_))
    }
}

impl From<IdParseError> for DomainError {
    fn from(err: IdParseError) -> Self {
        Self::ValidationError(err.to_string())
    }
}
