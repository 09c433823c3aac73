//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    ActorHistoryParams, DistributionParams, LeaderboardParams, PopularParams,
    ReactionSnapshotParams, ReconcileRequest, RemoveReactionRequest, SubmitReactionRequest,
    DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, RECENT_REACTORS_LIMIT,
};

// Re-export commonly used response types
pub use responses::{
    ActorReactionResponse, DistributionResponse, HealthChecks, HealthResponse,
    InsightReactionsResponse, LeaderboardEntryResponse, LeaderboardResponse, PageMeta,
    PopularFeedResponse, PopularInsightResponse, PriorityBreakdown, ReactionSummaryEntry,
    ReactorResponse, ReadinessResponse, ReconcileReportResponse, RemoveReactionResponse,
    SentimentBreakdown, ToggleReactionResponse, TypeBreakdown,
};

pub use mappers::reaction_summary;
