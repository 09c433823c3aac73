//! Test fixtures and data generators
//!
//! Insights belong to an external CRUD service, so tests insert them straight
//! into the database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use chrono::{DateTime, Utc};
use insight_db::PgPool;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Actor id that no other test uses
pub fn unique_actor(prefix: &str) -> String {
    format!("{prefix}-{}-{}", unique_suffix(), Uuid::new_v4().simple())
}

/// Insert an insight captured `age` ago and return its id
pub async fn seed_insight(pool: &PgPool, author_id: &str, age: chrono::Duration) -> Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO insights (id, author_id, author_name, content, captured_at) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(id)
    .bind(author_id)
    .bind(author_id.to_uppercase())
    .bind(format!("integration insight {}", unique_suffix()))
    .bind(Utc::now() - age)
    .execute(pool)
    .await?;
    Ok(id)
}

/// Overwrite the stored aggregate without touching reactions
pub async fn corrupt_aggregate(pool: &PgPool, insight_id: Uuid, total: i64) -> Result<()> {
    sqlx::query(
        "UPDATE insights SET reaction_total = $2, reaction_counts = jsonb_build_object('like', $2::bigint) \
         WHERE id = $1",
    )
    .bind(insight_id)
    .bind(total)
    .execute(pool)
    .await?;
    Ok(())
}

/// Submit reaction request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReaction {
    pub actor_id: String,
    pub actor_display_name: Option<String>,
    #[serde(rename = "type")]
    pub reaction_type: String,
}

impl SubmitReaction {
    pub fn new(actor_id: &str, reaction_type: &str) -> Self {
        Self {
            actor_id: actor_id.to_string(),
            actor_display_name: Some(actor_id.to_uppercase()),
            reaction_type: reaction_type.to_string(),
        }
    }
}

/// Remove reaction request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveReaction {
    pub actor_id: String,
}

/// Toggle response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub action: String,
    pub user_reaction: Option<String>,
    pub reaction_counts: HashMap<String, i64>,
    pub reaction_total: i64,
}

/// Aggregate after removal
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResponse {
    pub reaction_counts: HashMap<String, i64>,
    pub reaction_total: i64,
}

/// Recent reactor entry
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reactor {
    pub actor_id: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub reaction_type: String,
    pub created_at: DateTime<Utc>,
}

/// Reaction snapshot of one insight
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotResponse {
    pub insight_id: Uuid,
    pub reaction_counts: HashMap<String, i64>,
    pub reaction_total: i64,
    #[serde(default)]
    pub user_reaction: Option<String>,
    pub recent_reactors: Vec<Reactor>,
}

/// Popular feed item
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularItem {
    pub id: Uuid,
    pub reaction_total: i64,
}

/// Popular feed pagination
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

/// Popular feed page
#[derive(Debug, Deserialize)]
pub struct PopularResponse {
    pub insights: Vec<PopularItem>,
    pub pagination: Pagination,
}

/// Leaderboard entry
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub actor_id: String,
    pub total_insights: i64,
    pub impact_score: i64,
}

/// Leaderboard
#[derive(Debug, Deserialize)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
}

/// Reconciliation report
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileResponse {
    pub scanned: usize,
    pub corrected: usize,
    pub next_cursor: Option<Uuid>,
}

/// Error body
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
