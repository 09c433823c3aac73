//! Insight ranking handlers

use axum::extract::State;
use insight_service::dto::{LeaderboardParams, LeaderboardResponse, PopularFeedResponse, PopularParams};
use insight_service::{LeaderboardService, PopularityService};

use crate::extractors::ApiQuery;
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Popular insights for a period
///
/// GET /insights/popular?period&sort&limit&offset&actorId
pub async fn get_popular(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PopularParams>,
) -> ApiResult<ApiJson<PopularFeedResponse>> {
    let service = PopularityService::new(state.service_context());
    Ok(ApiJson(service.list(&params).await?))
}

/// Contributor leaderboard
///
/// GET /insights/leaderboard?period&limit
pub async fn get_leaderboard(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<LeaderboardParams>,
) -> ApiResult<ApiJson<LeaderboardResponse>> {
    let service = LeaderboardService::new(state.service_context());
    Ok(ApiJson(service.leaderboard(&params).await?))
}
