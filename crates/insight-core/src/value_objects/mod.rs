//! Value objects - immutable domain primitives

mod classification;
mod ids;
mod period;
mod popularity_sort;
mod reaction_counts;
mod reaction_type;

pub use classification::{InsightType, Priority, Sentiment};
pub use ids::{ActorId, IdParseError, InsightId, MAX_ACTOR_ID_LEN};
pub use period::{Period, TimeRange};
pub use popularity_sort::PopularitySort;
pub use reaction_counts::ReactionCounts;
pub use reaction_type::{ReactionType, REACTION_SCHEMA_VERSION};
