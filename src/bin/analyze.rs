//! One-shot batch analysis of the built-in asset profiles.
//!
//! Prints the JSON report to stdout. Pass symbols as arguments to restrict the
//! run to those assets.

use dotenvy::dotenv;
use macroscope::config::{default_profiles, ServiceConfig};
use macroscope::logging;
use macroscope::metrics::Metrics;
use macroscope::services::{AnalysisService, YahooChartProvider};
use std::env;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = ServiceConfig::from_env();
    let requested: Vec<String> = env::args().skip(1).collect();

    let mut profiles = default_profiles();
    if !requested.is_empty() {
        profiles.retain(|p| requested.iter().any(|s| s.eq_ignore_ascii_case(&p.symbol)));
        for symbol in &requested {
            if !profiles.iter().any(|p| p.symbol.eq_ignore_ascii_case(symbol)) {
                warn!(symbol = %symbol, "no profile for symbol, skipping");
            }
        }
    }

    info!(assets = profiles.len(), range = %config.history_range, "Running analysis batch");

    let provider = YahooChartProvider::new(&config.yahoo_base_url, config.provider_max_retries)?;
    let metrics = Arc::new(Metrics::new()?);
    let service = AnalysisService::new(Arc::new(provider), profiles, config).with_metrics(metrics);

    let report = service.run_batch().await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
