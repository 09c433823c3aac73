//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use insight_core::entities::Reaction;
use insight_core::traits::{ReactionRepository, ReactionUnitOfWork, RepoResult};
use insight_core::value_objects::{ActorId, InsightId, ReactionCounts};

use crate::mappers::{counts_from_models, reactions_from_models};
use crate::models::{ReactionCountModel, ReactionModel};

use super::error::map_db_error;
use super::unit_of_work::PgReactionUnitOfWork;

/// Upper bound on rows returned by the listing queries
const MAX_LIST_LIMIT: i64 = 100;

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    async fn begin(&self) -> RepoResult<Box<dyn ReactionUnitOfWork>> {
        let tx = self.pool.begin().await.map_err(map_db_error)?;
        Ok(Box::new(PgReactionUnitOfWork::new(tx)))
    }

    #[instrument(skip(self))]
    async fn find(&self, insight_id: InsightId, actor_id: &ActorId) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT insight_id, actor_id, actor_display_name, reaction_type, created_at
            FROM reactions
            WHERE insight_id = $1 AND actor_id = $2
            "#,
        )
        .bind(insight_id.into_inner())
        .bind(actor_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Reaction::try_from).transpose()
    }

    #[instrument(skip(self, insight_ids), fields(batch = insight_ids.len()))]
    async fn find_for_actor(
        &self,
        actor_id: &ActorId,
        insight_ids: &[InsightId],
    ) -> RepoResult<Vec<Reaction>> {
        if insight_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = insight_ids.iter().map(|id| id.into_inner()).collect();

        let results = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT insight_id, actor_id, actor_display_name, reaction_type, created_at
            FROM reactions
            WHERE actor_id = $1 AND insight_id = ANY($2)
            "#,
        )
        .bind(actor_id.as_str())
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        reactions_from_models(results)
    }

    #[instrument(skip(self))]
    async fn find_recent_by_insight(
        &self,
        insight_id: InsightId,
        limit: i64,
    ) -> RepoResult<Vec<Reaction>> {
        let limit = limit.clamp(1, MAX_LIST_LIMIT);

        let results = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT insight_id, actor_id, actor_display_name, reaction_type, created_at
            FROM reactions
            WHERE insight_id = $1
            ORDER BY created_at DESC, actor_id ASC
            LIMIT $2
            "#,
        )
        .bind(insight_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        reactions_from_models(results)
    }

    #[instrument(skip(self))]
    async fn find_by_actor(&self, actor_id: &ActorId, limit: i64) -> RepoResult<Vec<Reaction>> {
        let limit = limit.clamp(1, MAX_LIST_LIMIT);

        let results = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT insight_id, actor_id, actor_display_name, reaction_type, created_at
            FROM reactions
            WHERE actor_id = $1
            ORDER BY created_at DESC, insight_id ASC
            LIMIT $2
            "#,
        )
        .bind(actor_id.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        reactions_from_models(results)
    }

    #[instrument(skip(self))]
    async fn count_by_type(&self, since: Option<DateTime<Utc>>) -> RepoResult<ReactionCounts> {
        let results = sqlx::query_as::<_, ReactionCountModel>(
            r#"
            SELECT reaction_type, COUNT(*) AS count
            FROM reactions
            WHERE ($1::timestamptz IS NULL OR created_at >= $1)
            GROUP BY reaction_type
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        counts_from_models(results)
    }
}
