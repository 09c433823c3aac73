//! # insight-core
//!
//! Domain layer containing entities, value objects, the reaction toggle state
//! machine, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod toggle;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    build_leaderboard, ContributorStats, Insight, InsightAggregate, PriorityCounts, Reaction,
    SentimentCounts, TypeCounts,
};
pub use error::DomainError;
pub use toggle::{CounterDelta, ReactionState, ToggleAction, Transition};
pub use traits::{
    InsightRepository, PopularQuery, ReactionRepository, ReactionUnitOfWork, RepoResult,
};
pub use value_objects::{
    ActorId, IdParseError, InsightId, InsightType, Period, PopularitySort, Priority,
    ReactionCounts, ReactionType, Sentiment, TimeRange, MAX_ACTOR_ID_LEN,
    REACTION_SCHEMA_VERSION,
};
