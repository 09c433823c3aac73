//! Leaderboard service
//!
//! Ranks contributors by authored insights within a period. Reads authorship
//! and classification only; reactions do not feed the ranking.

use chrono::Utc;
use tracing::{debug, instrument};

use insight_core::entities::ContributorStats;
use insight_core::value_objects::Period;

use crate::dto::{
    LeaderboardEntryResponse, LeaderboardParams, LeaderboardResponse, PriorityBreakdown,
    SentimentBreakdown, TypeBreakdown,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::params::{page_limit, parse_period};

/// Leaderboard service
pub struct LeaderboardService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LeaderboardService<'a> {
    /// Create a new LeaderboardService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Parse query parameters and compute
    pub async fn leaderboard(&self, params: &LeaderboardParams) -> ServiceResult<LeaderboardResponse> {
        let period = parse_period(params.period.as_deref())?;
        self.compute(period, page_limit(params.limit)).await
    }

    /// Top `limit` contributors, by insight count then actor id
    #[instrument(skip(self))]
    pub async fn compute(&self, period: Period, limit: i64) -> ServiceResult<LeaderboardResponse> {
        let range = period.time_range(Utc::now());
        let stats = self
            .ctx
            .bounded(async {
                Ok::<_, ServiceError>(self.ctx.insight_repo().leaderboard(&range, limit).await?)
            })
            .await?;

        debug!(contributors = stats.len(), "Leaderboard computed");

        Ok(LeaderboardResponse {
            period,
            entries: stats
                .iter()
                .enumerate()
                .map(|(index, stats)| entry(index + 1, stats))
                .collect(),
        })
    }
}

fn entry(rank: usize, stats: &ContributorStats) -> LeaderboardEntryResponse {
    LeaderboardEntryResponse {
        rank,
        actor_id: stats.actor_id.clone(),
        display_name: stats.display_name.clone(),
        total_insights: stats.total_insights,
        sentiment: SentimentBreakdown::from(stats),
        priority: PriorityBreakdown::from(stats),
        types: TypeBreakdown::from(stats),
        distinct_event_count: stats.distinct_event_count,
        impact_score: stats.impact_score(),
        last_activity_at: stats.last_activity_at,
    }
}
