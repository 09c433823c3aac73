//! Database models - SQLx-compatible structs for PostgreSQL tables

mod contributor;
mod insight;
mod reaction;

pub use contributor::ContributorStatsModel;
pub use insight::{AggregateModel, InsightModel};
pub use reaction::{ReactionCountModel, ReactionModel};
