//! Leaderboard row model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// One author's grouped contribution counts (from query)
#[derive(Debug, Clone, FromRow)]
pub struct ContributorStatsModel {
    pub author_id: String,
    pub display_name: String,
    pub total_insights: i64,
    pub positive_count: i64,
    pub neutral_count: i64,
    pub negative_count: i64,
    pub critical_count: i64,
    pub high_count: i64,
    pub medium_count: i64,
    pub low_count: i64,
    pub feature_request_count: i64,
    pub bug_report_count: i64,
    pub use_case_count: i64,
    pub general_count: i64,
    pub distinct_event_count: i64,
    pub last_activity_at: Option<DateTime<Utc>>,
}
