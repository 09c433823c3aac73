//! Insight entity and its embedded reaction aggregate

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;
use crate::toggle::CounterDelta;
use crate::value_objects::{InsightId, InsightType, Priority, ReactionCounts, Sentiment};

/// A shared feedback item
///
/// Everything except `reaction_counts` and `reaction_total` is owned by the
/// insight CRUD collaborator. Those two fields are written only by the
/// reaction toggle path and reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    pub id: InsightId,
    pub author_id: String,
    pub author_name: String,
    pub content: String,
    pub event_id: Option<Uuid>,
    pub sentiment: Option<Sentiment>,
    pub priority: Option<Priority>,
    pub insight_type: Option<InsightType>,
    pub captured_at: DateTime<Utc>,
    pub reaction_counts: ReactionCounts,
    pub reaction_total: i64,
}

impl Insight {
    /// Create an unclassified insight with no reactions
    pub fn new(
        id: InsightId,
        author_id: String,
        author_name: String,
        captured_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author_id,
            author_name,
            content: String::new(),
            event_id: None,
            sentiment: None,
            priority: None,
            insight_type: None,
            captured_at,
            reaction_counts: ReactionCounts::zero(),
            reaction_total: 0,
        }
    }

    /// The reaction projection of this insight
    pub fn aggregate(&self) -> InsightAggregate {
        InsightAggregate {
            insight_id: self.id,
            counts: self.reaction_counts,
            total: self.reaction_total,
        }
    }
}

/// Denormalized reaction counters embedded in an insight record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsightAggregate {
    pub insight_id: InsightId,
    pub counts: ReactionCounts,
    pub total: i64,
}

impl InsightAggregate {
    /// An aggregate with no reactions
    pub fn empty(insight_id: InsightId) -> Self {
        Self {
            insight_id,
            counts: ReactionCounts::zero(),
            total: 0,
        }
    }

    /// Aggregate rebuilt from true per-type counts
    pub fn from_counts(insight_id: InsightId, counts: ReactionCounts) -> Self {
        Self {
            insight_id,
            counts,
            total: counts.total(),
        }
    }

    /// `total == Σ counts` and nothing negative
    pub fn is_consistent(&self) -> bool {
        self.counts.is_non_negative() && self.total >= 0 && self.total == self.counts.total()
    }

    /// Apply a counter delta
    ///
    /// Refuses to drive any counter below zero: that can only happen if the
    /// aggregate has drifted from the reaction records.
    pub fn apply(&mut self, delta: &CounterDelta) -> Result<(), DomainError> {
        let mut next = self.counts;
        for (kind, change) in delta.changes() {
            next.set(kind, next.get(kind) + change);
        }
        let next_total = self.total + delta.total();

        if !next.is_non_negative() || next_total < 0 {
            return Err(DomainError::AggregateDrift(self.insight_id));
        }

        self.counts = next;
        self.total = next_total;
        Ok(())
    }
}
