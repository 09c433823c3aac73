//! # insight-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `insight-core`. It handles:
//!
//! - Connection pool management and runtime migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations, including the transactional reaction unit of work
//!
//! ## Usage
//!
//! ```rust,ignore
//! use insight_db::{create_pool, run_migrations, DatabaseConfig, PgReactionRepository};
//! use insight_core::traits::ReactionRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     run_migrations(&pool, "./migrations").await?;
//!     let reaction_repo = PgReactionRepository::new(pool);
//!
//!     let uow = reaction_repo.begin().await?;
//!     // Toggle through the unit of work, then commit...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{PgInsightRepository, PgReactionRepository, PgReactionUnitOfWork};
