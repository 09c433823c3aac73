//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod context;
pub mod error;
pub mod leaderboard;
mod params;
pub mod popularity;
pub mod reaction;
pub mod reconciliation;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder, DEFAULT_OPERATION_TIMEOUT};
pub use error::{ServiceError, ServiceResult};
pub use leaderboard::LeaderboardService;
pub use popularity::PopularityService;
pub use reaction::{ReactionService, ToggleOutcome};
pub use reconciliation::{ReconcileReport, ReconciliationService, DEFAULT_RECONCILE_BATCH};
