//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;

use axum::Router;
use insight_common::{AppConfig, AppError};
use insight_db::{create_pool, run_migrations};
use insight_service::ServiceContext;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::scheduler::spawn_reconciler;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes get the same tracing and CORS layers but skip rate limiting.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let is_production = config.app.env.is_production();
    let operation_timeout = config.reactions.operation_timeout();

    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        is_production,
        operation_timeout,
    )?;
    let health = apply_middleware(health_routes(), &config.cors, is_production, operation_timeout);

    Ok(api.merge(health).with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let operation_timeout = config.reactions.operation_timeout();

    info!("Connecting to PostgreSQL...");
    let db_config = insight_db::DatabaseConfig::from_app(&config.database, operation_timeout);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Unavailable(format!("database connection failed: {e}")))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, &config.database.migrations_dir)
            .await
            .map_err(|e| AppError::Config(format!("migrations failed: {e}")))?;
    } else {
        warn!("Skipping database migrations");
    }

    let service_context = ServiceContext::postgres(pool, operation_timeout);

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server until ctrl-c
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid API_HOST/API_PORT: {e}")))?;

    let state = create_app_state(config).await?;

    let reconciler = spawn_reconciler(state.shared_context(), &state.config().reconcile);

    let app = create_app(state)?;
    let result = run_server(app, addr).await;

    if let Some(handle) = reconciler {
        handle.abort();
    }
    result
}
