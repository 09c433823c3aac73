//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output, with camelCase
//! field names. Reaction counts always carry every reaction type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use insight_core::toggle::ToggleAction;
use insight_core::value_objects::{
    InsightId, InsightType, Period, PopularitySort, Priority, ReactionCounts, ReactionType,
    Sentiment,
};

// ============================================================================
// Common Response Types
// ============================================================================

/// Offset pagination metadata
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub limit: i64,
    pub offset: i64,
    /// Whether another page follows
    pub has_more: bool,
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// One entry of a human-readable reaction summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionSummaryEntry {
    #[serde(rename = "type")]
    pub reaction_type: ReactionType,
    pub emoji: &'static str,
    pub count: i64,
}

/// Confirmed result of a toggle
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleReactionResponse {
    pub action: ToggleAction,
    /// The actor's reaction after the toggle, `null` once removed
    pub user_reaction: Option<ReactionType>,
    pub reaction_counts: ReactionCounts,
    pub reaction_total: i64,
}

/// Aggregate after an explicit removal
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveReactionResponse {
    pub reaction_counts: ReactionCounts,
    pub reaction_total: i64,
}

/// Someone who reacted to an insight
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactorResponse {
    pub actor_id: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub reaction_type: ReactionType,
    pub created_at: DateTime<Utc>,
}

/// Reaction state of one insight
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightReactionsResponse {
    pub insight_id: InsightId,
    pub reaction_counts: ReactionCounts,
    pub reaction_total: i64,
    pub reaction_summary: Vec<ReactionSummaryEntry>,
    /// Only present when the query named an actor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_reaction: Option<Option<ReactionType>>,
    /// Newest first
    pub recent_reactors: Vec<ReactorResponse>,
}

/// One reaction from an actor's history
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorReactionResponse {
    pub insight_id: InsightId,
    #[serde(rename = "type")]
    pub reaction_type: ReactionType,
    pub created_at: DateTime<Utc>,
}

/// Global count per reaction type
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionResponse {
    pub period: Period,
    pub reaction_counts: ReactionCounts,
    pub reaction_total: i64,
}

// ============================================================================
// Popularity Responses
// ============================================================================

/// Insight in the popular feed
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularInsightResponse {
    pub id: InsightId,
    pub author_id: String,
    pub author_name: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<uuid::Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight_type: Option<InsightType>,
    pub captured_at: DateTime<Utc>,
    pub reaction_counts: ReactionCounts,
    pub reaction_total: i64,
    pub reaction_summary: Vec<ReactionSummaryEntry>,
    /// Viewer's own reaction; only present when a viewer was named
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_reaction: Option<Option<ReactionType>>,
}

/// One page of the popular feed
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularFeedResponse {
    pub period: Period,
    pub sort: PopularitySort,
    pub insights: Vec<PopularInsightResponse>,
    pub pagination: PageMeta,
}

// ============================================================================
// Leaderboard Responses
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SentimentBreakdown {
    pub positive: i64,
    pub neutral: i64,
    pub negative: i64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PriorityBreakdown {
    pub critical: i64,
    pub high: i64,
    pub medium: i64,
    pub low: i64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeBreakdown {
    pub feature_request: i64,
    pub bug_report: i64,
    pub use_case: i64,
    pub general: i64,
}

/// Ranked contributor
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryResponse {
    /// 1-based
    pub rank: usize,
    pub actor_id: String,
    pub display_name: String,
    pub total_insights: i64,
    pub sentiment: SentimentBreakdown,
    pub priority: PriorityBreakdown,
    pub types: TypeBreakdown,
    pub distinct_event_count: i64,
    pub impact_score: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub period: Period,
    pub entries: Vec<LeaderboardEntryResponse>,
}

// ============================================================================
// Admin Responses
// ============================================================================

/// Outcome of one reconciliation batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReportResponse {
    pub scanned: usize,
    pub corrected: usize,
    /// Resume cursor; `null` once the walk reached the end
    pub next_cursor: Option<InsightId>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing store
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
