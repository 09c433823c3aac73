//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in insight-core.

mod error;
mod insight;
mod reaction;
mod unit_of_work;

pub use insight::PgInsightRepository;
pub use reaction::PgReactionRepository;
pub use unit_of_work::PgReactionUnitOfWork;
