//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{ContributorStats, Insight, InsightAggregate, Reaction};
use crate::error::DomainError;
use crate::toggle::CounterDelta;
use crate::value_objects::{ActorId, InsightId, PopularitySort, ReactionCounts, ReactionType, TimeRange};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Reaction Unit of Work
// ============================================================================

/// One atomic span over the reaction records and an insight's aggregate
///
/// Everything written through a unit of work commits together on
/// [`ReactionUnitOfWork::commit`]. Dropping it without committing discards
/// every write, which is what happens when a caller times out or is cancelled.
#[async_trait]
pub trait ReactionUnitOfWork: Send {
    /// Check that the insight exists
    async fn insight_exists(&mut self, insight_id: InsightId) -> RepoResult<bool>;

    /// Read the actor's reaction, holding it against concurrent toggles
    async fn lock_reaction(
        &mut self,
        insight_id: InsightId,
        actor_id: &ActorId,
    ) -> RepoResult<Option<Reaction>>;

    /// Insert a reaction
    ///
    /// Returns `false` when one already exists for the pair. That is not an
    /// error: the caller re-reads and takes the change/remove branch.
    async fn insert_reaction(&mut self, reaction: &Reaction) -> RepoResult<bool>;

    /// Change the type of an existing reaction in place
    async fn update_reaction_type(
        &mut self,
        insight_id: InsightId,
        actor_id: &ActorId,
        reaction_type: ReactionType,
    ) -> RepoResult<()>;

    /// Delete a reaction, returning whether a record was removed
    async fn delete_reaction(&mut self, insight_id: InsightId, actor_id: &ActorId)
        -> RepoResult<bool>;

    /// Atomically apply a counter delta to the insight's aggregate
    ///
    /// Fails with [`DomainError::AggregateDrift`] rather than drive a counter
    /// negative, and with [`DomainError::InsightNotFound`] if the insight is gone.
    async fn apply_delta(
        &mut self,
        insight_id: InsightId,
        delta: &CounterDelta,
    ) -> RepoResult<InsightAggregate>;

    /// Read the stored aggregate, holding it against concurrent toggles
    async fn lock_aggregate(&mut self, insight_id: InsightId)
        -> RepoResult<Option<InsightAggregate>>;

    /// Count reaction records per type for an insight
    async fn count_reactions(&mut self, insight_id: InsightId) -> RepoResult<ReactionCounts>;

    /// Replace the stored aggregate wholesale
    async fn overwrite_aggregate(&mut self, aggregate: &InsightAggregate) -> RepoResult<()>;

    /// Commit every write made through this unit of work
    async fn commit(self: Box<Self>) -> RepoResult<()>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Start a unit of work
    async fn begin(&self) -> RepoResult<Box<dyn ReactionUnitOfWork>>;

    /// Find the reaction of one actor on one insight
    async fn find(&self, insight_id: InsightId, actor_id: &ActorId) -> RepoResult<Option<Reaction>>;

    /// One actor's reactions across a set of insights, in a single lookup
    async fn find_for_actor(
        &self,
        actor_id: &ActorId,
        insight_ids: &[InsightId],
    ) -> RepoResult<Vec<Reaction>>;

    /// Most recent reactions on an insight, newest first
    async fn find_recent_by_insight(
        &self,
        insight_id: InsightId,
        limit: i64,
    ) -> RepoResult<Vec<Reaction>>;

    /// An actor's reaction history, newest first
    async fn find_by_actor(&self, actor_id: &ActorId, limit: i64) -> RepoResult<Vec<Reaction>>;

    /// Reaction counts per type over reactions created at or after `since`
    async fn count_by_type(&self, since: Option<DateTime<Utc>>) -> RepoResult<ReactionCounts>;
}

// ============================================================================
// Insight Repository
// ============================================================================

/// Page request for the popularity feed
#[derive(Debug, Clone, Copy)]
pub struct PopularQuery {
    pub range: TimeRange,
    pub sort: PopularitySort,
    pub limit: i64,
    pub offset: i64,
}

/// Read access to insights
///
/// Insights are created and edited by another service; the reaction core only
/// reads them here and writes their aggregate through a [`ReactionUnitOfWork`].
#[async_trait]
pub trait InsightRepository: Send + Sync {
    /// Check that the backing store answers
    async fn ping(&self) -> RepoResult<()>;

    /// Read an insight's aggregate
    async fn find_aggregate(&self, insight_id: InsightId) -> RepoResult<Option<InsightAggregate>>;

    /// Insights with at least one reaction, captured inside the query range,
    /// ordered by [`PopularitySort::compare`]
    async fn find_popular(&self, query: &PopularQuery) -> RepoResult<Vec<Insight>>;

    /// Insight ids in ascending order, strictly after `after`
    async fn list_ids(&self, after: Option<InsightId>, limit: i64) -> RepoResult<Vec<InsightId>>;

    /// Per-author contribution stats for insights captured inside `range`,
    /// ranked by [`ContributorStats::rank_cmp`]
    async fn leaderboard(&self, range: &TimeRange, limit: i64) -> RepoResult<Vec<ContributorStats>>;
}
