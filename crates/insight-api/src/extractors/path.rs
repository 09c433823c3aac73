//! Path parameter extractors
//!
//! Type-safe extraction of insight and actor ids from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use insight_core::value_objects::InsightId;
use serde::Deserialize;

use crate::response::ApiError;

/// `:insight_id` parsed as a UUID
#[derive(Debug, Clone, Copy)]
pub struct InsightIdPath(pub InsightId);

#[derive(Debug, Deserialize)]
struct RawInsightId {
    insight_id: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for InsightIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<RawInsightId>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        raw.insight_id
            .parse()
            .map(InsightIdPath)
            .map_err(|_| ApiError::invalid_path("Invalid insight_id format"))
    }
}

/// `:actor_id` as received; the service validates it
#[derive(Debug, Clone)]
pub struct ActorIdPath(pub String);

#[derive(Debug, Deserialize)]
struct RawActorId {
    actor_id: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for ActorIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<RawActorId>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        Ok(ActorIdPath(raw.actor_id))
    }
}
