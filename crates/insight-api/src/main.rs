//! Insight reactions API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p insight-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env` when present).

use insight_common::{try_init_tracing, try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Logging format depends on APP_ENV, so configuration loads first
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            if try_init_tracing().is_err() {
                eprintln!("Failed to load configuration: {e}");
            }
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        host = %config.api.host,
        port = config.api.port,
        operation_timeout_ms = config.reactions.operation_timeout_ms,
        "Configuration loaded"
    );

    if let Err(e) = insight_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
