//! Request DTOs for API endpoints
//!
//! Bodies implement `Deserialize` and `Validate`; query strings are plain
//! `Deserialize` structs parsed into domain values by the services.

use insight_core::value_objects::ActorId;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Default page size for the popular feed
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Largest page the popular feed and listings will return
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Recent reactors shown with an insight's reaction snapshot
pub const RECENT_REACTORS_LIMIT: i64 = 10;

// ============================================================================
// Reaction Requests
// ============================================================================

/// Submit (toggle) a reaction
///
/// Fields default to empty so a missing `actorId` or `type` surfaces as a
/// validation error rather than a body parse failure.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReactionRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 128, message = "actorId is required"))]
    pub actor_id: String,

    #[validate(length(max = 256, message = "actorDisplayName must be at most 256 characters"))]
    pub actor_display_name: Option<String>,

    #[serde(default, rename = "type")]
    #[validate(length(min = 1, message = "type is required"))]
    pub reaction_type: String,
}

impl SubmitReactionRequest {
    /// Display name to store, falling back to the parsed actor id
    pub fn display_name(&self, actor_id: &ActorId) -> String {
        self.actor_display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(actor_id.as_str())
            .to_string()
    }
}

/// Explicitly remove a reaction
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RemoveReactionRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 128, message = "actorId is required"))]
    pub actor_id: String,
}

/// Query for an insight's reaction snapshot
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionSnapshotParams {
    pub actor_id: Option<String>,
}

/// Query for an actor's reaction history
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActorHistoryParams {
    pub limit: Option<i64>,
}

/// Query for the global reaction-type distribution
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DistributionParams {
    pub period: Option<String>,
}

// ============================================================================
// Popularity & Leaderboard Requests
// ============================================================================

/// Query for the popular feed
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularParams {
    pub period: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Viewer whose own reaction annotates each item
    pub actor_id: Option<String>,
}

/// Query for the contributor leaderboard
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaderboardParams {
    pub period: Option<String>,
    pub limit: Option<i64>,
}

// ============================================================================
// Admin Requests
// ============================================================================

/// Run one reconciliation batch
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileRequest {
    /// Resume after this insight id
    pub after_cursor: Option<Uuid>,

    #[validate(range(min = 1, max = 1000, message = "batchSize must be 1-1000"))]
    pub batch_size: Option<u32>,
}
