//! Reaction handlers
//!
//! Toggle, remove and read the reactions on one insight, plus the global
//! reaction-type distribution.

use axum::extract::State;
use insight_service::dto::{
    DistributionParams, DistributionResponse, InsightReactionsResponse, ReactionSnapshotParams,
    RemoveReactionRequest, RemoveReactionResponse, SubmitReactionRequest, ToggleReactionResponse,
};
use insight_service::ReactionService;

use crate::extractors::{ApiQuery, InsightIdPath, ValidatedJson};
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Toggle the caller's reaction
///
/// POST /insights/{insight_id}/react
pub async fn submit_reaction(
    State(state): State<AppState>,
    InsightIdPath(insight_id): InsightIdPath,
    ValidatedJson(request): ValidatedJson<SubmitReactionRequest>,
) -> ApiResult<ApiJson<ToggleReactionResponse>> {
    let service = ReactionService::new(state.service_context());
    let outcome = service.submit(insight_id, &request).await?;
    Ok(ApiJson(outcome.into()))
}

/// Remove the caller's reaction, whatever its type
///
/// DELETE /insights/{insight_id}/react
pub async fn remove_reaction(
    State(state): State<AppState>,
    InsightIdPath(insight_id): InsightIdPath,
    ValidatedJson(request): ValidatedJson<RemoveReactionRequest>,
) -> ApiResult<ApiJson<RemoveReactionResponse>> {
    let service = ReactionService::new(state.service_context());
    let aggregate = service.remove(insight_id, &request).await?;
    Ok(ApiJson(aggregate.into()))
}

/// Reaction snapshot for one insight
///
/// GET /insights/{insight_id}/react?actorId=
pub async fn get_reactions(
    State(state): State<AppState>,
    InsightIdPath(insight_id): InsightIdPath,
    ApiQuery(params): ApiQuery<ReactionSnapshotParams>,
) -> ApiResult<ApiJson<InsightReactionsResponse>> {
    let service = ReactionService::new(state.service_context());
    let snapshot = service.snapshot(insight_id, &params).await?;
    Ok(ApiJson(snapshot))
}

/// Global count per reaction type
///
/// GET /reactions/distribution?period=
pub async fn get_distribution(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<DistributionParams>,
) -> ApiResult<ApiJson<DistributionResponse>> {
    let service = ReactionService::new(state.service_context());
    Ok(ApiJson(service.distribution_for(&params).await?))
}
