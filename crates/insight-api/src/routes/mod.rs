//! Route definitions
//!
//! Reaction, ranking and admin routes, mounted at the root.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{actors, admin, health, insights, reactions};
use crate::state::AppState;

/// Create the main API router (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(insight_routes())
        .merge(reaction_routes())
        .merge(actor_routes())
        .merge(admin_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Insight routes
fn insight_routes() -> Router<AppState> {
    Router::new()
        .route("/insights/popular", get(insights::get_popular))
        .route("/insights/leaderboard", get(insights::get_leaderboard))
        .route(
            "/insights/:insight_id/react",
            get(reactions::get_reactions)
                .post(reactions::submit_reaction)
                .delete(reactions::remove_reaction),
        )
}

/// Global reaction routes
fn reaction_routes() -> Router<AppState> {
    Router::new().route("/reactions/distribution", get(reactions::get_distribution))
}

/// Actor routes
fn actor_routes() -> Router<AppState> {
    Router::new().route("/actors/:actor_id/reactions", get(actors::get_actor_reactions))
}

/// Admin routes
fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/reconcile", post(admin::reconcile))
}
