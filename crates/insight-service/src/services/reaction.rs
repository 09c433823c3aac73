//! Reaction service
//!
//! Toggles reactions, removes them explicitly and answers reaction reads.
//! Every write goes through one [`ReactionUnitOfWork`](insight_core::traits::ReactionUnitOfWork),
//! so the reaction record and the insight aggregate change together or not at all.

use chrono::Utc;
use tracing::{debug, info, instrument};

use insight_core::entities::{InsightAggregate, Reaction};
use insight_core::toggle::{CounterDelta, ReactionState, ToggleAction};
use insight_core::value_objects::{ActorId, InsightId, Period, ReactionType};
use insight_core::DomainError;

use crate::dto::{
    reaction_summary, ActorHistoryParams, ActorReactionResponse, DistributionParams,
    DistributionResponse, InsightReactionsResponse, ReactionSnapshotParams, ReactorResponse,
    RemoveReactionRequest, SubmitReactionRequest, RECENT_REACTORS_LIMIT,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::params::{page_limit, parse_actor, parse_period};

/// Confirmed result of a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub action: ToggleAction,
    /// The actor's reaction after the toggle
    pub reaction_type: Option<ReactionType>,
    pub aggregate: InsightAggregate,
}

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle from a validated request body
    pub async fn submit(
        &self,
        insight_id: InsightId,
        request: &SubmitReactionRequest,
    ) -> ServiceResult<ToggleOutcome> {
        let actor_id = ActorId::parse(&request.actor_id).map_err(DomainError::from)?;
        let reaction_type = ReactionType::parse(&request.reaction_type)
            .ok_or_else(|| DomainError::UnknownReactionType(request.reaction_type.clone()))?;

        let display_name = request.display_name(&actor_id);
        self.submit_reaction(insight_id, actor_id, display_name, reaction_type)
            .await
    }

    /// Submit a reaction, toggling the actor's state on the insight
    ///
    /// Adds when the actor has no reaction, removes when resubmitting the
    /// held type, changes otherwise. The returned counts are the committed ones.
    #[instrument(skip_all, fields(insight_id = %insight_id, actor_id = %actor_id, reaction_type = %reaction_type))]
    pub async fn submit_reaction(
        &self,
        insight_id: InsightId,
        actor_id: ActorId,
        display_name: String,
        reaction_type: ReactionType,
    ) -> ServiceResult<ToggleOutcome> {
        let outcome = self
            .ctx
            .bounded(self.toggle(insight_id, &actor_id, &display_name, reaction_type))
            .await?;

        info!(
            action = outcome.action.as_str(),
            reaction_total = outcome.aggregate.total,
            "Reaction toggled"
        );

        Ok(outcome)
    }

    async fn toggle(
        &self,
        insight_id: InsightId,
        actor_id: &ActorId,
        display_name: &str,
        requested: ReactionType,
    ) -> ServiceResult<ToggleOutcome> {
        let mut uow = self.ctx.reaction_repo().begin().await?;

        if !uow.insight_exists(insight_id).await? {
            return Err(DomainError::InsightNotFound(insight_id).into());
        }

        // A lost insert race means another request committed the same pair,
        // so the next locked read takes the change or remove branch. The
        // operation timeout bounds the loop.
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let current = uow.lock_reaction(insight_id, actor_id).await?;
            let transition =
                ReactionState::from_current(current.map(|r| r.reaction_type)).transition(requested);

            match transition.action {
                ToggleAction::Added => {
                    let reaction = Reaction::new(
                        insight_id,
                        actor_id.clone(),
                        display_name.to_string(),
                        requested,
                    );
                    if !uow.insert_reaction(&reaction).await? {
                        debug!(attempt, "Lost insert race, re-reading reaction");
                        continue;
                    }
                }
                ToggleAction::Removed => {
                    uow.delete_reaction(insight_id, actor_id).await?;
                }
                ToggleAction::Changed => {
                    uow.update_reaction_type(insight_id, actor_id, requested).await?;
                }
            }

            let aggregate = uow.apply_delta(insight_id, &transition.delta).await?;
            uow.commit().await?;

            return Ok(ToggleOutcome {
                action: transition.action,
                reaction_type: transition.next.reaction_type(),
                aggregate,
            });
        }
    }

    /// Remove from a validated request body
    pub async fn remove(
        &self,
        insight_id: InsightId,
        request: &RemoveReactionRequest,
    ) -> ServiceResult<InsightAggregate> {
        let actor_id = ActorId::parse(&request.actor_id).map_err(DomainError::from)?;
        self.remove_reaction(insight_id, &actor_id).await
    }

    /// Remove the actor's reaction, whatever its type
    ///
    /// Fails with `ReactionNotFound` when there is nothing to remove, so a
    /// second removal is reported rather than silently ignored.
    #[instrument(skip_all, fields(insight_id = %insight_id, actor_id = %actor_id))]
    pub async fn remove_reaction(
        &self,
        insight_id: InsightId,
        actor_id: &ActorId,
    ) -> ServiceResult<InsightAggregate> {
        let aggregate = self
            .ctx
            .bounded(self.remove_in_unit(insight_id, actor_id))
            .await?;

        info!(reaction_total = aggregate.total, "Reaction removed");

        Ok(aggregate)
    }

    async fn remove_in_unit(
        &self,
        insight_id: InsightId,
        actor_id: &ActorId,
    ) -> ServiceResult<InsightAggregate> {
        let mut uow = self.ctx.reaction_repo().begin().await?;

        if !uow.insight_exists(insight_id).await? {
            return Err(DomainError::InsightNotFound(insight_id).into());
        }

        let Some(existing) = uow.lock_reaction(insight_id, actor_id).await? else {
            return Err(DomainError::ReactionNotFound {
                insight_id,
                actor_id: actor_id.clone(),
            }
            .into());
        };

        uow.delete_reaction(insight_id, actor_id).await?;
        let aggregate = uow
            .apply_delta(insight_id, &CounterDelta::remove(existing.reaction_type))
            .await?;
        uow.commit().await?;

        Ok(aggregate)
    }

    /// Snapshot from query parameters; a blank `actorId` means no viewer
    pub async fn snapshot(
        &self,
        insight_id: InsightId,
        params: &ReactionSnapshotParams,
    ) -> ServiceResult<InsightReactionsResponse> {
        let viewer = parse_actor(params.actor_id.as_deref())?;
        self.get_reactions(insight_id, viewer.as_ref()).await
    }

    /// Counts, the viewer's reaction and the most recent reactors
    #[instrument(skip(self))]
    pub async fn get_reactions(
        &self,
        insight_id: InsightId,
        viewer: Option<&ActorId>,
    ) -> ServiceResult<InsightReactionsResponse> {
        self.ctx.bounded(self.load_snapshot(insight_id, viewer)).await
    }

    async fn load_snapshot(
        &self,
        insight_id: InsightId,
        viewer: Option<&ActorId>,
    ) -> ServiceResult<InsightReactionsResponse> {
        let aggregate = self
            .ctx
            .insight_repo()
            .find_aggregate(insight_id)
            .await?
            .ok_or(DomainError::InsightNotFound(insight_id))?;

        let user_reaction = match viewer {
            Some(actor_id) => Some(
                self.ctx
                    .reaction_repo()
                    .find(insight_id, actor_id)
                    .await?
                    .map(|r| r.reaction_type),
            ),
            None => None,
        };

        let recent = self
            .ctx
            .reaction_repo()
            .find_recent_by_insight(insight_id, RECENT_REACTORS_LIMIT)
            .await?;

        Ok(InsightReactionsResponse {
            insight_id,
            reaction_counts: aggregate.counts,
            reaction_total: aggregate.total,
            reaction_summary: reaction_summary(&aggregate.counts),
            user_reaction,
            recent_reactors: recent.iter().map(ReactorResponse::from).collect(),
        })
    }

    /// History for a raw path segment and query parameters
    pub async fn history(
        &self,
        raw_actor_id: &str,
        params: &ActorHistoryParams,
    ) -> ServiceResult<Vec<ActorReactionResponse>> {
        let actor_id = ActorId::parse(raw_actor_id).map_err(DomainError::from)?;
        self.actor_history(&actor_id, params.limit).await
    }

    /// An actor's reactions, newest first
    #[instrument(skip(self))]
    pub async fn actor_history(
        &self,
        actor_id: &ActorId,
        limit: Option<i64>,
    ) -> ServiceResult<Vec<ActorReactionResponse>> {
        let reactions = self
            .ctx
            .bounded(async {
                Ok::<_, ServiceError>(
                    self.ctx
                        .reaction_repo()
                        .find_by_actor(actor_id, page_limit(limit))
                        .await?,
                )
            })
            .await?;

        Ok(reactions.iter().map(ActorReactionResponse::from).collect())
    }

    /// Distribution from query parameters, defaulting to a week
    pub async fn distribution_for(
        &self,
        params: &DistributionParams,
    ) -> ServiceResult<DistributionResponse> {
        let period = parse_period(params.period.as_deref())?;
        self.distribution(period).await
    }

    /// Global count per reaction type for reactions made within the period
    #[instrument(skip(self))]
    pub async fn distribution(&self, period: Period) -> ServiceResult<DistributionResponse> {
        let since = period.time_range(Utc::now()).since;
        let counts = self
            .ctx
            .bounded(async {
                Ok::<_, ServiceError>(self.ctx.reaction_repo().count_by_type(since).await?)
            })
            .await?;

        Ok(DistributionResponse {
            period,
            reaction_total: counts.total(),
            reaction_counts: counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use insight_core::value_objects::ReactionCounts;

    use crate::services::ServiceContextBuilder;
    use crate::testing::MemoryStore;

    fn context(store: &MemoryStore) -> ServiceContext {
        ServiceContextBuilder::new()
            .insight_repo(Arc::new(store.clone()))
            .reaction_repo(Arc::new(store.clone()))
            .build()
            .unwrap()
    }

    fn actor(name: &str) -> ActorId {
        ActorId::parse(name).unwrap()
    }

    async fn assert_invariant(store: &MemoryStore, insight_id: InsightId) {
        let insight = store.insight(insight_id).await.unwrap();
        let reactions = store.reactions_for(insight_id).await;
        let tallied = ReactionCounts::tally(reactions.iter().map(|r| r.reaction_type));
        assert_eq!(insight.reaction_counts, tallied);
        assert_eq!(insight.reaction_total, insight.reaction_counts.total());
        assert_eq!(insight.reaction_total, reactions.len() as i64);
    }

    #[tokio::test]
    async fn test_first_reaction_is_added() {
        let store = MemoryStore::new();
        let ctx = context(&store);
        let insight_id = store.seed_insight("author", "Author", chrono::Duration::hours(1)).await;

        let outcome = ReactionService::new(&ctx)
            .submit_reaction(insight_id, actor("alice"), "Alice".into(), ReactionType::Love)
            .await
            .unwrap();

        assert_eq!(outcome.action, ToggleAction::Added);
        assert_eq!(outcome.reaction_type, Some(ReactionType::Love));
        assert_eq!(outcome.aggregate.counts.get(ReactionType::Love), 1);
        assert_eq!(outcome.aggregate.total, 1);
        assert_invariant(&store, insight_id).await;
    }

    #[tokio::test]
    async fn test_same_type_again_removes() {
        let store = MemoryStore::new();
        let ctx = context(&store);
        let service = ReactionService::new(&ctx);
        let insight_id = store.seed_insight("author", "Author", chrono::Duration::hours(1)).await;

        service
            .submit_reaction(insight_id, actor("alice"), "Alice".into(), ReactionType::Love)
            .await
            .unwrap();
        let outcome = service
            .submit_reaction(insight_id, actor("alice"), "Alice".into(), ReactionType::Love)
            .await
            .unwrap();

        assert_eq!(outcome.action, ToggleAction::Removed);
        assert_eq!(outcome.reaction_type, None);
        assert_eq!(outcome.aggregate.counts, ReactionCounts::zero());
        assert_eq!(outcome.aggregate.total, 0);
        assert!(store.reactions_for(insight_id).await.is_empty());
    }

    #[tokio::test]
    async fn test_different_type_changes_in_place() {
        let store = MemoryStore::new();
        let ctx = context(&store);
        let service = ReactionService::new(&ctx);
        let insight_id = store.seed_insight("author", "Author", chrono::Duration::hours(1)).await;

        service
            .submit_reaction(insight_id, actor("alice"), "Alice".into(), ReactionType::Love)
            .await
            .unwrap();
        let outcome = service
            .submit_reaction(insight_id, actor("alice"), "Alice".into(), ReactionType::Fire)
            .await
            .unwrap();

        assert_eq!(outcome.action, ToggleAction::Changed);
        assert_eq!(outcome.reaction_type, Some(ReactionType::Fire));
        assert_eq!(outcome.aggregate.counts.get(ReactionType::Love), 0);
        assert_eq!(outcome.aggregate.counts.get(ReactionType::Fire), 1);
        assert_eq!(outcome.aggregate.total, 1);

        let reactions = store.reactions_for(insight_id).await;
        assert_eq!(reactions.len(), 1);
        assert_eq!(reactions[0].reaction_type, ReactionType::Fire);
    }

    #[tokio::test]
    async fn test_concurrent_actors_both_count() {
        let store = MemoryStore::new();
        let ctx = context(&store);
        let insight_id = store.seed_insight("author", "Author", chrono::Duration::hours(1)).await;

        let handles: Vec<_> = ["alice", "bob"]
            .into_iter()
            .map(|name| {
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    ReactionService::new(&ctx)
                        .submit_reaction(insight_id, actor(name), name.into(), ReactionType::Like)
                        .await
                })
            })
            .collect();

        for handle in handles {
            let outcome = handle.await.unwrap().unwrap();
            assert_eq!(outcome.action, ToggleAction::Added);
        }

        let insight = store.insight(insight_id).await.unwrap();
        assert_eq!(insight.reaction_counts.get(ReactionType::Like), 2);
        assert_eq!(insight.reaction_total, 2);
        assert_eq!(store.reactions_for(insight_id).await.len(), 2);
    }

    #[tokio::test]
    async fn test_many_concurrent_toggles_keep_invariant() {
        let store = MemoryStore::new();
        let ctx = context(&store);
        let insight_id = store.seed_insight("author", "Author", chrono::Duration::hours(1)).await;

        let mut handles = Vec::new();
        for i in 0..40u32 {
            let ctx = ctx.clone();
            let name = format!("actor-{}", i % 7);
            let kind = ReactionType::ALL[(i as usize) % ReactionType::COUNT];
            handles.push(tokio::spawn(async move {
                ReactionService::new(&ctx)
                    .submit_reaction(insight_id, actor(&name), name.clone(), kind)
                    .await
            }));
        }
        for result in futures::future::join_all(handles).await {
            result.unwrap().unwrap();
        }

        assert_invariant(&store, insight_id).await;
    }

    #[tokio::test]
    async fn test_same_actor_concurrent_submits_serialize() {
        let store = MemoryStore::new();
        let ctx = context(&store);
        let insight_id = store.seed_insight("author", "Author", chrono::Duration::hours(1)).await;

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    ReactionService::new(&ctx)
                        .submit_reaction(insight_id, actor("alice"), "Alice".into(), ReactionType::Love)
                        .await
                })
            })
            .collect();

        let mut actions = Vec::new();
        for handle in handles {
            actions.push(handle.await.unwrap().unwrap().action);
        }
        actions.sort_by_key(|a| a.as_str());

        assert_eq!(actions, vec![ToggleAction::Added, ToggleAction::Removed]);
        assert_eq!(store.insight(insight_id).await.unwrap().reaction_total, 0);
    }

    #[tokio::test]
    async fn test_lost_insert_race_same_type_removes() {
        let store = MemoryStore::new();
        let ctx = context(&store);
        let insight_id = store.seed_insight("author", "Author", chrono::Duration::hours(1)).await;
        store
            .race_next_insert(Reaction::new(insight_id, actor("alice"), "Alice".into(), ReactionType::Love))
            .await;

        let outcome = ReactionService::new(&ctx)
            .submit_reaction(insight_id, actor("alice"), "Alice".into(), ReactionType::Love)
            .await
            .unwrap();

        assert_eq!(outcome.action, ToggleAction::Removed);
        assert_eq!(outcome.reaction_type, None);
        assert_eq!(outcome.aggregate.counts.get(ReactionType::Love), 0);
        assert_eq!(outcome.aggregate.total, 0);
        assert!(store.reactions_for(insight_id).await.is_empty());
        assert_invariant(&store, insight_id).await;
    }

    #[tokio::test]
    async fn test_lost_insert_race_other_type_changes() {
        let store = MemoryStore::new();
        let ctx = context(&store);
        let insight_id = store.seed_insight("author", "Author", chrono::Duration::hours(1)).await;
        store
            .race_next_insert(Reaction::new(insight_id, actor("alice"), "Alice".into(), ReactionType::Fire))
            .await;

        let outcome = ReactionService::new(&ctx)
            .submit_reaction(insight_id, actor("alice"), "Alice".into(), ReactionType::Love)
            .await
            .unwrap();

        assert_eq!(outcome.action, ToggleAction::Changed);
        assert_eq!(outcome.reaction_type, Some(ReactionType::Love));
        assert_eq!(outcome.aggregate.counts.get(ReactionType::Love), 1);
        assert_eq!(outcome.aggregate.counts.get(ReactionType::Fire), 0);
        assert_eq!(outcome.aggregate.total, 1);

        let reactions = store.reactions_for(insight_id).await;
        assert_eq!(reactions.len(), 1);
        assert_eq!(reactions[0].reaction_type, ReactionType::Love);
        assert_invariant(&store, insight_id).await;
    }

    #[tokio::test]
    async fn test_submit_trims_actor_used_as_display_name() {
        let store = MemoryStore::new();
        let ctx = context(&store);
        let insight_id = store.seed_insight("author", "Author", chrono::Duration::hours(1)).await;

        let request = SubmitReactionRequest {
            actor_id: " alice ".to_string(),
            actor_display_name: None,
            reaction_type: "like".to_string(),
        };
        ReactionService::new(&ctx).submit(insight_id, &request).await.unwrap();

        let reactions = store.reactions_for(insight_id).await;
        assert_eq!(reactions.len(), 1);
        assert_eq!(reactions[0].actor_id.as_str(), "alice");
        assert_eq!(reactions[0].actor_display_name, "alice");
    }

    #[tokio::test]
    async fn test_unknown_insight_writes_nothing() {
        let store = MemoryStore::new();
        let ctx = context(&store);

        let err = ReactionService::new(&ctx)
            .submit_reaction(InsightId::generate(), actor("alice"), "Alice".into(), ReactionType::Like)
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "UNKNOWN_INSIGHT");
    }

    #[tokio::test]
    async fn test_submit_rejects_unknown_type() {
        let store = MemoryStore::new();
        let ctx = context(&store);
        let insight_id = store.seed_insight("author", "Author", chrono::Duration::hours(1)).await;

        let request = SubmitReactionRequest {
            actor_id: "alice".to_string(),
            actor_display_name: None,
            reaction_type: "angry".to_string(),
        };
        let err = ReactionService::new(&ctx)
            .submit(insight_id, &request)
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "UNKNOWN_REACTION_TYPE");
        assert!(store.reactions_for(insight_id).await.is_empty());
    }

    #[tokio::test]
    async fn test_remove_then_not_found() {
        let store = MemoryStore::new();
        let ctx = context(&store);
        let service = ReactionService::new(&ctx);
        let insight_id = store.seed_insight("author", "Author", chrono::Duration::hours(1)).await;
        let alice = actor("alice");

        service
            .submit_reaction(insight_id, alice.clone(), "Alice".into(), ReactionType::Celebrate)
            .await
            .unwrap();

        let aggregate = service.remove_reaction(insight_id, &alice).await.unwrap();
        assert_eq!(aggregate.total, 0);
        assert_eq!(aggregate.counts.get(ReactionType::Celebrate), 0);

        let err = service.remove_reaction(insight_id, &alice).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "UNKNOWN_REACTION");
        assert_invariant(&store, insight_id).await;
    }

    #[tokio::test]
    async fn test_timeout_leaves_no_partial_write() {
        let store = MemoryStore::new().with_commit_delay(Duration::from_millis(300));
        let ctx = ServiceContextBuilder::new()
            .insight_repo(Arc::new(store.clone()))
            .reaction_repo(Arc::new(store.clone()))
            .operation_timeout(Duration::from_millis(30))
            .build()
            .unwrap();
        let insight_id = store.seed_insight("author", "Author", chrono::Duration::hours(1)).await;

        let err = ReactionService::new(&ctx)
            .submit_reaction(insight_id, actor("alice"), "Alice".into(), ReactionType::Like)
            .await
            .unwrap_err();

        assert!(err.is_outcome_unknown());
        assert_eq!(err.status_code(), 503);
        assert_eq!(store.insight(insight_id).await.unwrap().reaction_total, 0);
        assert!(store.reactions_for(insight_id).await.is_empty());
    }

    #[tokio::test]
    async fn test_store_down_is_unavailable() {
        let store = MemoryStore::new().unavailable();
        let ctx = context(&store);

        let err = ReactionService::new(&ctx)
            .submit_reaction(InsightId::generate(), actor("alice"), "Alice".into(), ReactionType::Like)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 503);
        assert_eq!(err.error_code(), "DATABASE_ERROR");
    }

    #[tokio::test]
    async fn test_snapshot_includes_viewer_and_recent() {
        let store = MemoryStore::new();
        let ctx = context(&store);
        let service = ReactionService::new(&ctx);
        let insight_id = store.seed_insight("author", "Author", chrono::Duration::hours(1)).await;

        for (name, kind) in [("alice", ReactionType::Love), ("bob", ReactionType::Fire)] {
            service
                .submit_reaction(insight_id, actor(name), name.to_uppercase(), kind)
                .await
                .unwrap();
        }

        let viewer = actor("bob");
        let snapshot = service.get_reactions(insight_id, Some(&viewer)).await.unwrap();
        assert_eq!(snapshot.reaction_total, 2);
        assert_eq!(snapshot.user_reaction, Some(Some(ReactionType::Fire)));
        assert_eq!(snapshot.recent_reactors.len(), 2);
        assert_eq!(snapshot.reaction_summary.len(), 2);

        let anonymous = service.get_reactions(insight_id, None).await.unwrap();
        assert_eq!(anonymous.user_reaction, None);

        let stranger = actor("carol");
        let snapshot = service.get_reactions(insight_id, Some(&stranger)).await.unwrap();
        assert_eq!(snapshot.user_reaction, Some(None));
    }

    #[tokio::test]
    async fn test_history_and_distribution() {
        let store = MemoryStore::new();
        let ctx = context(&store);
        let service = ReactionService::new(&ctx);
        let first = store.seed_insight("author", "Author", chrono::Duration::hours(1)).await;
        let second = store.seed_insight("author", "Author", chrono::Duration::hours(2)).await;
        let alice = actor("alice");

        service
            .submit_reaction(first, alice.clone(), "Alice".into(), ReactionType::Like)
            .await
            .unwrap();
        service
            .submit_reaction(second, alice.clone(), "Alice".into(), ReactionType::Insightful)
            .await
            .unwrap();
        service
            .submit_reaction(second, actor("bob"), "Bob".into(), ReactionType::Like)
            .await
            .unwrap();

        let history = service.actor_history(&alice, None).await.unwrap();
        assert_eq!(history.len(), 2);

        let distribution = service.distribution(Period::All).await.unwrap();
        assert_eq!(distribution.reaction_counts.get(ReactionType::Like), 2);
        assert_eq!(distribution.reaction_counts.get(ReactionType::Insightful), 1);
        assert_eq!(distribution.reaction_counts.get(ReactionType::Fire), 0);
        assert_eq!(distribution.reaction_total, 3);
    }

    #[tokio::test]
    async fn test_param_entry_points() {
        let store = MemoryStore::new();
        let ctx = context(&store);
        let service = ReactionService::new(&ctx);
        let insight_id = store.seed_insight("author", "Author", chrono::Duration::hours(1)).await;
        service
            .submit_reaction(insight_id, actor("alice"), "Alice".into(), ReactionType::Celebrate)
            .await
            .unwrap();

        let blank = ReactionSnapshotParams {
            actor_id: Some("  ".to_string()),
        };
        assert_eq!(service.snapshot(insight_id, &blank).await.unwrap().user_reaction, None);

        let history = service
            .history("alice", &ActorHistoryParams { limit: Some(5) })
            .await
            .unwrap();
        assert_eq!(history.len(), 1);

        let distribution = service
            .distribution_for(&DistributionParams::default())
            .await
            .unwrap();
        assert_eq!(distribution.period, Period::Week);
        assert_eq!(distribution.reaction_total, 1);

        let bad = DistributionParams {
            period: Some("fortnight".to_string()),
        };
        assert_eq!(service.distribution_for(&bad).await.unwrap_err().status_code(), 400);
    }
}
