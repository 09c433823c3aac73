//! In-memory store for tests
//!
//! [`MemoryStore`] implements every repository port over one shared state.
//! A unit of work holds the state lock for its lifetime and writes to a
//! staged copy; `commit` publishes the copy, dropping discards it. That gives
//! the same all-or-nothing and serialization guarantees as the PostgreSQL
//! transaction, at the granularity of the whole store.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};

use insight_core::entities::{build_leaderboard, ContributorStats, Insight, InsightAggregate, Reaction};
use insight_core::error::DomainError;
use insight_core::toggle::CounterDelta;
use insight_core::traits::{
    InsightRepository, PopularQuery, ReactionRepository, ReactionUnitOfWork, RepoResult,
};
use insight_core::value_objects::{ActorId, InsightId, ReactionCounts, ReactionType, TimeRange};

type ReactionKey = (InsightId, ActorId);

#[derive(Debug, Clone, Default)]
struct MemoryState {
    insights: BTreeMap<InsightId, Insight>,
    reactions: BTreeMap<ReactionKey, Reaction>,
}

/// Shared in-memory store; clones share state
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
    rival_inserts: Arc<Mutex<Vec<Reaction>>>,
    commit_delay: Option<Duration>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every commit, to exercise operation timeouts
    #[must_use]
    pub fn with_commit_delay(mut self, delay: Duration) -> Self {
        self.commit_delay = Some(delay);
        self
    }

    /// Fail every operation as if the database were down
    #[must_use]
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Seed an insight with an empty aggregate
    pub async fn insert_insight(&self, insight: Insight) {
        self.state.lock().await.insights.insert(insight.id, insight);
    }

    /// Seed an insight captured `age` ago
    pub async fn seed_insight(&self, author_id: &str, author_name: &str, age: chrono::Duration) -> InsightId {
        let insight = Insight::new(
            InsightId::generate(),
            author_id.to_string(),
            author_name.to_string(),
            Utc::now() - age,
        );
        let id = insight.id;
        self.insert_insight(insight).await;
        id
    }

    /// Current copy of an insight
    pub async fn insight(&self, insight_id: InsightId) -> Option<Insight> {
        self.state.lock().await.insights.get(&insight_id).cloned()
    }

    /// Every reaction recorded against an insight
    pub async fn reactions_for(&self, insight_id: InsightId) -> Vec<Reaction> {
        self.state
            .lock()
            .await
            .reactions
            .values()
            .filter(|r| r.insight_id == insight_id)
            .cloned()
            .collect()
    }

    /// Overwrite an aggregate without touching reactions, simulating drift
    pub async fn corrupt_aggregate(&self, insight_id: InsightId, counts: ReactionCounts, total: i64) {
        if let Some(insight) = self.state.lock().await.insights.get_mut(&insight_id) {
            insight.reaction_counts = counts;
            insight.reaction_total = total;
        }
    }

    /// Let a concurrent toggle win the next insert of the same pair
    ///
    /// When a unit of work inserts a reaction for `rival`'s (insight, actor)
    /// pair, `rival` is committed first, aggregate included, and the insert
    /// reports the conflict. Each queued rival fires once.
    pub async fn race_next_insert(&self, rival: Reaction) {
        self.rival_inserts.lock().await.push(rival);
    }

    /// Insert a reaction record without touching the aggregate, simulating drift
    pub async fn insert_orphan_reaction(&self, reaction: Reaction) {
        self.state
            .lock()
            .await
            .reactions
            .insert((reaction.insight_id, reaction.actor_id.clone()), reaction);
    }

    fn check_available(&self) -> RepoResult<()> {
        if self.unavailable {
            return Err(DomainError::DatabaseError("memory store marked unavailable".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// Unit of work
// ============================================================================

/// Unit of work over a staged copy of the store
pub struct MemoryUnitOfWork {
    guard: OwnedMutexGuard<MemoryState>,
    staged: MemoryState,
    rival_inserts: Arc<Mutex<Vec<Reaction>>>,
    commit_delay: Option<Duration>,
}

impl MemoryUnitOfWork {
    /// Commit a queued rival for this pair, if any, to both the published and staged state
    async fn commit_rival(&mut self, insight_id: InsightId, actor_id: &ActorId) -> RepoResult<bool> {
        let rival = {
            let mut rivals = self.rival_inserts.lock().await;
            match rivals
                .iter()
                .position(|r| r.insight_id == insight_id && &r.actor_id == actor_id)
            {
                Some(index) => rivals.remove(index),
                None => return Ok(false),
            }
        };

        let delta = CounterDelta::add(rival.reaction_type);
        for state in [&mut *self.guard, &mut self.staged] {
            let insight = state
                .insights
                .get_mut(&insight_id)
                .ok_or(DomainError::InsightNotFound(insight_id))?;
            let mut aggregate = insight.aggregate();
            aggregate.apply(&delta)?;
            insight.reaction_counts = aggregate.counts;
            insight.reaction_total = aggregate.total;
            state
                .reactions
                .insert((insight_id, actor_id.clone()), rival.clone());
        }
        Ok(true)
    }
}

#[async_trait]
impl ReactionUnitOfWork for MemoryUnitOfWork {
    async fn insight_exists(&mut self, insight_id: InsightId) -> RepoResult<bool> {
        Ok(self.staged.insights.contains_key(&insight_id))
    }

    async fn lock_reaction(
        &mut self,
        insight_id: InsightId,
        actor_id: &ActorId,
    ) -> RepoResult<Option<Reaction>> {
        Ok(self
            .staged
            .reactions
            .get(&(insight_id, actor_id.clone()))
            .cloned())
    }

    async fn insert_reaction(&mut self, reaction: &Reaction) -> RepoResult<bool> {
        if !self.staged.insights.contains_key(&reaction.insight_id) {
            return Err(DomainError::InsightNotFound(reaction.insight_id));
        }
        if self.commit_rival(reaction.insight_id, &reaction.actor_id).await? {
            return Ok(false);
        }
        let key = (reaction.insight_id, reaction.actor_id.clone());
        if self.staged.reactions.contains_key(&key) {
            return Ok(false);
        }
        self.staged.reactions.insert(key, reaction.clone());
        Ok(true)
    }

    async fn update_reaction_type(
        &mut self,
        insight_id: InsightId,
        actor_id: &ActorId,
        reaction_type: ReactionType,
    ) -> RepoResult<()> {
        match self.staged.reactions.get_mut(&(insight_id, actor_id.clone())) {
            Some(reaction) => {
                reaction.reaction_type = reaction_type;
                Ok(())
            }
            None => Err(DomainError::ReactionNotFound {
                insight_id,
                actor_id: actor_id.clone(),
            }),
        }
    }

    async fn delete_reaction(&mut self, insight_id: InsightId, actor_id: &ActorId) -> RepoResult<bool> {
        Ok(self
            .staged
            .reactions
            .remove(&(insight_id, actor_id.clone()))
            .is_some())
    }

    async fn apply_delta(
        &mut self,
        insight_id: InsightId,
        delta: &CounterDelta,
    ) -> RepoResult<InsightAggregate> {
        let insight = self
            .staged
            .insights
            .get_mut(&insight_id)
            .ok_or(DomainError::InsightNotFound(insight_id))?;

        let mut aggregate = insight.aggregate();
        aggregate.apply(delta)?;
        insight.reaction_counts = aggregate.counts;
        insight.reaction_total = aggregate.total;
        Ok(aggregate)
    }

    async fn lock_aggregate(&mut self, insight_id: InsightId) -> RepoResult<Option<InsightAggregate>> {
        Ok(self.staged.insights.get(&insight_id).map(Insight::aggregate))
    }

    async fn count_reactions(&mut self, insight_id: InsightId) -> RepoResult<ReactionCounts> {
        Ok(ReactionCounts::tally(
            self.staged
                .reactions
                .values()
                .filter(|r| r.insight_id == insight_id)
                .map(|r| r.reaction_type),
        ))
    }

    async fn overwrite_aggregate(&mut self, aggregate: &InsightAggregate) -> RepoResult<()> {
        let insight = self
            .staged
            .insights
            .get_mut(&aggregate.insight_id)
            .ok_or(DomainError::InsightNotFound(aggregate.insight_id))?;
        insight.reaction_counts = aggregate.counts;
        insight.reaction_total = aggregate.total;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        let MemoryUnitOfWork {
            mut guard,
            staged,
            commit_delay,
            ..
        } = *self;
        if let Some(delay) = commit_delay {
            tokio::time::sleep(delay).await;
        }
        *guard = staged;
        Ok(())
    }
}

// ============================================================================
// Repositories
// ============================================================================

#[async_trait]
impl ReactionRepository for MemoryStore {
    async fn begin(&self) -> RepoResult<Box<dyn ReactionUnitOfWork>> {
        self.check_available()?;
        let guard = Arc::clone(&self.state).lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(MemoryUnitOfWork {
            guard,
            staged,
            rival_inserts: Arc::clone(&self.rival_inserts),
            commit_delay: self.commit_delay,
        }))
    }

    async fn find(&self, insight_id: InsightId, actor_id: &ActorId) -> RepoResult<Option<Reaction>> {
        self.check_available()?;
        let state = self.state.lock().await;
        Ok(state.reactions.get(&(insight_id, actor_id.clone())).cloned())
    }

    async fn find_for_actor(
        &self,
        actor_id: &ActorId,
        insight_ids: &[InsightId],
    ) -> RepoResult<Vec<Reaction>> {
        self.check_available()?;
        let state = self.state.lock().await;
        Ok(insight_ids
            .iter()
            .filter_map(|id| state.reactions.get(&(*id, actor_id.clone())).cloned())
            .collect())
    }

    async fn find_recent_by_insight(&self, insight_id: InsightId, limit: i64) -> RepoResult<Vec<Reaction>> {
        self.check_available()?;
        let state = self.state.lock().await;
        let mut reactions: Vec<Reaction> = state
            .reactions
            .values()
            .filter(|r| r.insight_id == insight_id)
            .cloned()
            .collect();
        reactions.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.actor_id.cmp(&b.actor_id))
        });
        reactions.truncate(usize::try_from(limit.max(0)).unwrap_or(0));
        Ok(reactions)
    }

    async fn find_by_actor(&self, actor_id: &ActorId, limit: i64) -> RepoResult<Vec<Reaction>> {
        self.check_available()?;
        let state = self.state.lock().await;
        let mut reactions: Vec<Reaction> = state
            .reactions
            .values()
            .filter(|r| &r.actor_id == actor_id)
            .cloned()
            .collect();
        reactions.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.insight_id.cmp(&b.insight_id))
        });
        reactions.truncate(usize::try_from(limit.max(0)).unwrap_or(0));
        Ok(reactions)
    }

    async fn count_by_type(&self, since: Option<DateTime<Utc>>) -> RepoResult<ReactionCounts> {
        self.check_available()?;
        let state = self.state.lock().await;
        Ok(ReactionCounts::tally(
            state
                .reactions
                .values()
                .filter(|r| since.is_none_or(|since| r.created_at >= since))
                .map(|r| r.reaction_type),
        ))
    }
}

#[async_trait]
impl InsightRepository for MemoryStore {
    async fn ping(&self) -> RepoResult<()> {
        self.check_available()
    }

    async fn find_aggregate(&self, insight_id: InsightId) -> RepoResult<Option<InsightAggregate>> {
        self.check_available()?;
        let state = self.state.lock().await;
        Ok(state.insights.get(&insight_id).map(Insight::aggregate))
    }

    async fn find_popular(&self, query: &PopularQuery) -> RepoResult<Vec<Insight>> {
        self.check_available()?;
        let state = self.state.lock().await;
        let mut insights: Vec<Insight> = state
            .insights
            .values()
            .filter(|i| i.reaction_total > 0 && query.range.contains(i.captured_at))
            .cloned()
            .collect();
        insights.sort_by(|a, b| query.sort.compare(a, b));

        let offset = usize::try_from(query.offset.max(0)).unwrap_or(0);
        let limit = usize::try_from(query.limit.max(0)).unwrap_or(0);
        Ok(insights.into_iter().skip(offset).take(limit).collect())
    }

    async fn list_ids(&self, after: Option<InsightId>, limit: i64) -> RepoResult<Vec<InsightId>> {
        self.check_available()?;
        let state = self.state.lock().await;
        let limit = usize::try_from(limit.max(1)).unwrap_or(1);
        Ok(state
            .insights
            .keys()
            .filter(|id| after.is_none_or(|after| **id > after))
            .take(limit)
            .copied()
            .collect())
    }

    async fn leaderboard(&self, range: &TimeRange, limit: i64) -> RepoResult<Vec<ContributorStats>> {
        self.check_available()?;
        let state = self.state.lock().await;
        let limit = usize::try_from(limit.max(1)).unwrap_or(1);
        Ok(build_leaderboard(state.insights.values(), range, limit))
    }
}
