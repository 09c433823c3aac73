//! Ports implemented by the infrastructure layer

mod repositories;

pub use repositories::{
    InsightRepository, PopularQuery, ReactionRepository, ReactionUnitOfWork, RepoResult,
};
