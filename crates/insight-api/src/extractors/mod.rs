//! Axum extractors for request handling
//!
//! Custom extractors for path parsing, query strings and validated bodies.

mod path;
mod query;
mod validated;

pub use path::{ActorIdPath, InsightIdPath};
pub use query::ApiQuery;
pub use validated::ValidatedJson;
