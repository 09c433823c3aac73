//! # insight-service
//!
//! Application layer containing the reaction use cases, services, and DTOs.
//!
//! Services borrow a [`ServiceContext`] and are built per request:
//!
//! ```rust,ignore
//! let outcome = ReactionService::new(&ctx)
//!     .submit_reaction(insight_id, actor_id, display_name, ReactionType::Love)
//!     .await?;
//! ```

pub mod dto;
pub mod services;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use services::{
    LeaderboardService, PopularityService, ReactionService, ReconcileReport,
    ReconciliationService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    ToggleOutcome,
};
