//! Actor handlers

use axum::extract::State;
use insight_service::dto::{ActorHistoryParams, ActorReactionResponse};
use insight_service::ReactionService;

use crate::extractors::{ActorIdPath, ApiQuery};
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// An actor's reactions, newest first
///
/// GET /actors/{actor_id}/reactions?limit
pub async fn get_actor_reactions(
    State(state): State<AppState>,
    ActorIdPath(actor_id): ActorIdPath,
    ApiQuery(params): ApiQuery<ActorHistoryParams>,
) -> ApiResult<ApiJson<Vec<ActorReactionResponse>>> {
    let service = ReactionService::new(state.service_context());
    Ok(ApiJson(service.history(&actor_id, &params).await?))
}
