//! Popularity service
//!
//! Ranks reacted insights for a period and annotates them for a viewer.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, instrument};

use insight_core::entities::Insight;
use insight_core::traits::PopularQuery;
use insight_core::value_objects::{ActorId, InsightId, Period, PopularitySort, ReactionType};

use crate::dto::{PageMeta, PopularFeedResponse, PopularInsightResponse, PopularParams};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::params::{page_limit, page_offset, parse_actor, parse_period};

/// Popularity service
pub struct PopularityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PopularityService<'a> {
    /// Create a new PopularityService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Parse query parameters and list one page
    pub async fn list(&self, params: &PopularParams) -> ServiceResult<PopularFeedResponse> {
        let period = parse_period(params.period.as_deref())?;
        let sort = match params.sort.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse::<PopularitySort>()?,
            None => PopularitySort::default(),
        };
        let viewer = parse_actor(params.actor_id.as_deref())?;

        self.list_popular(
            period,
            sort,
            page_limit(params.limit),
            page_offset(params.offset),
            viewer.as_ref(),
        )
        .await
    }

    /// Insights with at least one reaction, ranked by `sort`
    ///
    /// With a viewer, every item carries the viewer's own reaction, fetched
    /// in one batched lookup for the whole page.
    #[instrument(skip_all, fields(period = %period, sort = %sort, limit = limit, offset = offset))]
    pub async fn list_popular(
        &self,
        period: Period,
        sort: PopularitySort,
        limit: i64,
        offset: i64,
        viewer: Option<&ActorId>,
    ) -> ServiceResult<PopularFeedResponse> {
        let query = PopularQuery {
            range: period.time_range(Utc::now()),
            sort,
            // One extra row tells whether another page exists
            limit: limit + 1,
            offset,
        };

        let (mut insights, viewer_reactions) = self
            .ctx
            .bounded(self.load_page(&query, viewer, limit))
            .await?;

        let has_more = insights.len() > usize::try_from(limit).unwrap_or(usize::MAX);
        insights.truncate(usize::try_from(limit).unwrap_or(usize::MAX));

        let items = insights
            .into_iter()
            .map(|insight| {
                let id = insight.id;
                let mut item = PopularInsightResponse::from(insight);
                if let Some(reactions) = &viewer_reactions {
                    item.user_reaction = Some(reactions.get(&id).copied());
                }
                item
            })
            .collect::<Vec<_>>();

        debug!(returned = items.len(), has_more, "Popular page listed");

        Ok(PopularFeedResponse {
            period,
            sort,
            insights: items,
            pagination: PageMeta {
                limit,
                offset,
                has_more,
            },
        })
    }

    async fn load_page(
        &self,
        query: &PopularQuery,
        viewer: Option<&ActorId>,
        limit: i64,
    ) -> ServiceResult<(Vec<Insight>, Option<HashMap<InsightId, ReactionType>>)> {
        let insights = self.ctx.insight_repo().find_popular(query).await?;

        let Some(actor_id) = viewer else {
            return Ok((insights, None));
        };

        let page_ids: Vec<InsightId> = insights
            .iter()
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(|insight| insight.id)
            .collect();
        let reactions = self
            .ctx
            .reaction_repo()
            .find_for_actor(actor_id, &page_ids)
            .await?
            .into_iter()
            .map(|reaction| (reaction.insight_id, reaction.reaction_type))
            .collect();

        Ok((insights, Some(reactions)))
    }
}
