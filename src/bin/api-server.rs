//! Macroscope API Server
//!
//! Serves the batch analysis, per-asset analysis, health check and metrics.
//! The service keeps no state between requests and can be scaled horizontally.

use dotenvy::dotenv;
use macroscope::config::ServiceConfig;
use macroscope::core::http::start_server;
use macroscope::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    logging::init_logging();

    let config = ServiceConfig::from_env();
    let port = config.port;

    let env = macroscope::config::get_environment();
    info!("Starting Macroscope API Server");
    info!(environment = %env, "Environment");
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);
    info!(range = %config.history_range, provider = %config.yahoo_base_url, "Market data");

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("API server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
            info!("API server stopped");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
