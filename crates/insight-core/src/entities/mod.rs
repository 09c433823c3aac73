//! Domain entities - core business objects

mod contributor;
mod insight;
mod reaction;

pub use contributor::{
    build_leaderboard, ContributorStats, PriorityCounts, SentimentCounts, TypeCounts,
};
pub use insight::{Insight, InsightAggregate};
pub use reaction::Reaction;
