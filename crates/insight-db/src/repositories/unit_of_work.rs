//! PostgreSQL unit of work spanning `reactions` and the insight aggregate
//!
//! Runs on one transaction at READ COMMITTED. The reaction row lock
//! (`SELECT ... FOR UPDATE`, or the pending unique key of an uncommitted
//! insert) serializes toggles by the same actor; the single-row `UPDATE` on
//! `insights` serializes counter changes by different actors.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{Postgres, Transaction};
use std::sync::LazyLock;
use tracing::{debug, instrument};

use insight_core::entities::{InsightAggregate, Reaction};
use insight_core::error::DomainError;
use insight_core::toggle::CounterDelta;
use insight_core::traits::{ReactionUnitOfWork, RepoResult};
use insight_core::value_objects::{ActorId, InsightId, ReactionCounts, ReactionType};

use crate::mappers::{counts_from_models, ReactionInsert};
use crate::models::{AggregateModel, ReactionCountModel, ReactionModel};

use super::error::{insight_not_found, map_db_error, map_reaction_write_error};

/// Counter update applied in one statement
///
/// Binds `$1` insight id, `$2..$6` per-type changes in [`ReactionType::ALL`]
/// order, `$7` total change. Rebuilding the map from the enumeration also
/// fills in keys the row has never been touched with. No row comes back when
/// any counter would go negative.
static APPLY_DELTA_SQL: LazyLock<String> = LazyLock::new(|| {
    let counter = |position: usize, kind: ReactionType| {
        format!(
            "COALESCE((reaction_counts ->> '{}')::bigint, 0) + ${}",
            kind.as_str(),
            position + 2
        )
    };
    let total_param = ReactionType::COUNT + 2;

    let fields: Vec<String> = ReactionType::ALL
        .into_iter()
        .enumerate()
        .map(|(position, kind)| format!("'{}', {}", kind.as_str(), counter(position, kind)))
        .collect();
    let guards: Vec<String> = ReactionType::ALL
        .into_iter()
        .enumerate()
        .map(|(position, kind)| format!("{} >= 0", counter(position, kind)))
        .collect();

    format!(
        "UPDATE insights \
         SET reaction_counts = jsonb_build_object({fields}), \
             reaction_total = reaction_total + ${total_param} \
         WHERE id = $1 AND reaction_total + ${total_param} >= 0 AND {guards} \
         RETURNING id, reaction_counts, reaction_total",
        fields = fields.join(", "),
        guards = guards.join(" AND "),
    )
});

/// Transaction-backed [`ReactionUnitOfWork`]
pub struct PgReactionUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

impl PgReactionUnitOfWork {
    pub(crate) fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl ReactionUnitOfWork for PgReactionUnitOfWork {
    #[instrument(skip_all, fields(insight_id = %insight_id))]
    async fn insight_exists(&mut self, insight_id: InsightId) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM insights WHERE id = $1)")
            .bind(insight_id.into_inner())
            .fetch_one(&mut *self.tx)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip_all, fields(insight_id = %insight_id, actor_id = %actor_id))]
    async fn lock_reaction(
        &mut self,
        insight_id: InsightId,
        actor_id: &ActorId,
    ) -> RepoResult<Option<Reaction>> {
        let row = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT insight_id, actor_id, actor_display_name, reaction_type, created_at
            FROM reactions
            WHERE insight_id = $1 AND actor_id = $2
            FOR UPDATE
            "#,
        )
        .bind(insight_id.into_inner())
        .bind(actor_id.as_str())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        row.map(Reaction::try_from).transpose()
    }

    #[instrument(skip_all, fields(insight_id = %reaction.insight_id, actor_id = %reaction.actor_id))]
    async fn insert_reaction(&mut self, reaction: &Reaction) -> RepoResult<bool> {
        let insert = ReactionInsert::new(reaction);

        let result = sqlx::query(
            r#"
            INSERT INTO reactions
                (insight_id, actor_id, actor_display_name, reaction_type, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            ON CONFLICT (insight_id, actor_id) DO NOTHING
            "#,
        )
        .bind(insert.insight_id)
        .bind(insert.actor_id)
        .bind(insert.actor_display_name)
        .bind(insert.reaction_type)
        .bind(reaction.created_at)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_reaction_write_error(e, reaction.insight_id))?;

        let inserted = result.rows_affected() == 1;
        if !inserted {
            debug!("reaction already exists for pair");
        }
        Ok(inserted)
    }

    #[instrument(skip_all, fields(insight_id = %insight_id, actor_id = %actor_id))]
    async fn update_reaction_type(
        &mut self,
        insight_id: InsightId,
        actor_id: &ActorId,
        reaction_type: ReactionType,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE reactions
            SET reaction_type = $3, updated_at = NOW()
            WHERE insight_id = $1 AND actor_id = $2
            "#,
        )
        .bind(insight_id.into_inner())
        .bind(actor_id.as_str())
        .bind(reaction_type.as_str())
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ReactionNotFound {
                insight_id,
                actor_id: actor_id.clone(),
            });
        }

        Ok(())
    }

    #[instrument(skip_all, fields(insight_id = %insight_id, actor_id = %actor_id))]
    async fn delete_reaction(&mut self, insight_id: InsightId, actor_id: &ActorId) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM reactions WHERE insight_id = $1 AND actor_id = $2
            "#,
        )
        .bind(insight_id.into_inner())
        .bind(actor_id.as_str())
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip_all, fields(insight_id = %insight_id, total_delta = delta.total()))]
    async fn apply_delta(
        &mut self,
        insight_id: InsightId,
        delta: &CounterDelta,
    ) -> RepoResult<InsightAggregate> {
        let mut query =
            sqlx::query_as::<_, AggregateModel>(APPLY_DELTA_SQL.as_str()).bind(insight_id.into_inner());
        for kind in ReactionType::ALL {
            query = query.bind(delta.get(kind));
        }
        let row = query
            .bind(delta.total())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_db_error)?;

        match row {
            Some(model) => Ok(model.into()),
            None if self.insight_exists(insight_id).await? => {
                Err(DomainError::AggregateDrift(insight_id))
            }
            None => Err(insight_not_found(insight_id)),
        }
    }

    #[instrument(skip_all, fields(insight_id = %insight_id))]
    async fn lock_aggregate(&mut self, insight_id: InsightId) -> RepoResult<Option<InsightAggregate>> {
        let row = sqlx::query_as::<_, AggregateModel>(
            r#"
            SELECT id, reaction_counts, reaction_total
            FROM insights
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(insight_id.into_inner())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(InsightAggregate::from))
    }

    #[instrument(skip_all, fields(insight_id = %insight_id))]
    async fn count_reactions(&mut self, insight_id: InsightId) -> RepoResult<ReactionCounts> {
        let rows = sqlx::query_as::<_, ReactionCountModel>(
            r#"
            SELECT reaction_type, COUNT(*) AS count
            FROM reactions
            WHERE insight_id = $1
            GROUP BY reaction_type
            "#,
        )
        .bind(insight_id.into_inner())
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        counts_from_models(rows)
    }

    #[instrument(skip_all, fields(insight_id = %aggregate.insight_id, total = aggregate.total))]
    async fn overwrite_aggregate(&mut self, aggregate: &InsightAggregate) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE insights
            SET reaction_counts = $2, reaction_total = $3
            WHERE id = $1
            "#,
        )
        .bind(aggregate.insight_id.into_inner())
        .bind(Json(aggregate.counts))
        .bind(aggregate.total)
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(insight_not_found(aggregate.insight_id));
        }

        Ok(())
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        let uow = *self;
        uow.tx.commit().await.map_err(map_db_error)
    }
}
