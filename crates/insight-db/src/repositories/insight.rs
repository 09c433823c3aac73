//! PostgreSQL implementation of InsightRepository
//!
//! Read-only over insights; the aggregate columns are written through
//! [`super::PgReactionUnitOfWork`].

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use insight_core::entities::{ContributorStats, Insight, InsightAggregate};
use insight_core::traits::{InsightRepository, PopularQuery, RepoResult};
use insight_core::value_objects::{InsightId, PopularitySort, TimeRange};

use crate::models::{AggregateModel, ContributorStatsModel, InsightModel};

use super::error::map_db_error;

const INSIGHT_COLUMNS: &str = "id, author_id, author_name, content, event_id, sentiment, \
     priority, insight_type, captured_at, reaction_counts, reaction_total";

/// `ORDER BY` for a popularity sort; `$5` is the reaction type for per-type sorts
fn popular_order_by(sort: PopularitySort) -> &'static str {
    match sort.effective() {
        PopularitySort::ByType(_) => {
            "COALESCE((reaction_counts ->> $5)::bigint, 0) DESC, reaction_total DESC, id ASC"
        }
        _ => "reaction_total DESC, captured_at DESC, id ASC",
    }
}

/// PostgreSQL implementation of InsightRepository
#[derive(Clone)]
pub struct PgInsightRepository {
    pool: PgPool,
}

impl PgInsightRepository {
    /// Create a new PgInsightRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InsightRepository for PgInsightRepository {
    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_aggregate(&self, insight_id: InsightId) -> RepoResult<Option<InsightAggregate>> {
        let result = sqlx::query_as::<_, AggregateModel>(
            r#"
            SELECT id, reaction_counts, reaction_total
            FROM insights
            WHERE id = $1
            "#,
        )
        .bind(insight_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(InsightAggregate::from))
    }

    #[instrument(skip(self), fields(sort = %query.sort))]
    async fn find_popular(&self, query: &PopularQuery) -> RepoResult<Vec<Insight>> {
        let sql = format!(
            "SELECT {INSIGHT_COLUMNS} \
             FROM insights \
             WHERE reaction_total > 0 \
               AND ($1::timestamptz IS NULL OR captured_at >= $1) \
               AND captured_at <= $2 \
             ORDER BY {} \
             LIMIT $3 OFFSET $4",
            popular_order_by(query.sort)
        );

        let mut statement = sqlx::query_as::<_, InsightModel>(&sql)
            .bind(query.range.since)
            .bind(query.range.until)
            .bind(query.limit)
            .bind(query.offset);
        if let PopularitySort::ByType(kind) = query.sort.effective() {
            statement = statement.bind(kind.as_str());
        }

        let results = statement
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        results.into_iter().map(Insight::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn list_ids(&self, after: Option<InsightId>, limit: i64) -> RepoResult<Vec<InsightId>> {
        let results = sqlx::query_scalar::<_, uuid::Uuid>(
            r#"
            SELECT id
            FROM insights
            WHERE ($1::uuid IS NULL OR id > $1)
            ORDER BY id ASC
            LIMIT $2
            "#,
        )
        .bind(after.map(InsightId::into_inner))
        .bind(limit.max(1))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(InsightId::new).collect())
    }

    #[instrument(skip(self))]
    async fn leaderboard(&self, range: &TimeRange, limit: i64) -> RepoResult<Vec<ContributorStats>> {
        let results = sqlx::query_as::<_, ContributorStatsModel>(
            r#"
            SELECT
                author_id,
                (ARRAY_AGG(author_name ORDER BY captured_at DESC))[1] AS display_name,
                COUNT(*) AS total_insights,
                COUNT(*) FILTER (WHERE sentiment = 'positive') AS positive_count,
                COUNT(*) FILTER (WHERE sentiment = 'neutral') AS neutral_count,
                COUNT(*) FILTER (WHERE sentiment = 'negative') AS negative_count,
                COUNT(*) FILTER (WHERE priority = 'critical') AS critical_count,
                COUNT(*) FILTER (WHERE priority = 'high') AS high_count,
                COUNT(*) FILTER (WHERE priority = 'medium') AS medium_count,
                COUNT(*) FILTER (WHERE priority = 'low') AS low_count,
                COUNT(*) FILTER (WHERE insight_type = 'feature_request') AS feature_request_count,
                COUNT(*) FILTER (WHERE insight_type = 'bug_report') AS bug_report_count,
                COUNT(*) FILTER (WHERE insight_type = 'use_case') AS use_case_count,
                COUNT(*) FILTER (WHERE insight_type = 'general') AS general_count,
                COUNT(DISTINCT event_id) AS distinct_event_count,
                MAX(captured_at) AS last_activity_at
            FROM insights
            WHERE ($1::timestamptz IS NULL OR captured_at >= $1)
              AND captured_at <= $2
            GROUP BY author_id
            ORDER BY total_insights DESC, author_id COLLATE "C" ASC
            LIMIT $3
            "#,
        )
        .bind(range.since)
        .bind(range.until)
        .bind(limit.max(1))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ContributorStats::from).collect())
    }
}
