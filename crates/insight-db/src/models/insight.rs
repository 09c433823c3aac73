//! Insight database models

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use insight_core::value_objects::ReactionCounts;

/// Database model for insights table
#[derive(Debug, Clone, FromRow)]
pub struct InsightModel {
    pub id: Uuid,
    pub author_id: String,
    pub author_name: String,
    pub content: String,
    pub event_id: Option<Uuid>,
    pub sentiment: Option<String>,
    pub priority: Option<String>,
    pub insight_type: Option<String>,
    pub captured_at: DateTime<Utc>,
    pub reaction_counts: Json<ReactionCounts>,
    pub reaction_total: i64,
}

/// Reaction columns of an insight row
#[derive(Debug, Clone, FromRow)]
pub struct AggregateModel {
    pub id: Uuid,
    pub reaction_counts: Json<ReactionCounts>,
    pub reaction_total: i64,
}

impl AggregateModel {
    /// Check the stored total against the stored per-type counts
    #[inline]
    pub fn is_self_consistent(&self) -> bool {
        self.reaction_counts.total() == self.reaction_total
    }
}
