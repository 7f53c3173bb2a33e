//! Runtime configuration: environment detection, service settings, pipeline
//! parameters and the built-in asset profiles.

pub mod assets;
pub mod pipeline;

pub use assets::{default_profiles, find_profile, AssetClass, AssetProfile};
pub use pipeline::{FrameConfig, FusionConfig, MacroConfig, PipelineConfig};

use std::env;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_HISTORY_RANGE: &str = "1y";
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_REPORT_UTC_OFFSET_HOURS: i32 = 9;
pub const DEFAULT_CHART_TAIL: usize = 20;
pub const DEFAULT_PROVIDER_MAX_RETRIES: usize = 3;

/// Deployment environment name (`ENVIRONMENT`, default `sandbox`).
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

pub fn is_production() -> bool {
    matches!(get_environment().as_str(), "production" | "prod")
}

/// Settings for the HTTP service and the batch runner.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub port: u16,
    pub history_range: String,
    pub yahoo_base_url: String,
    pub report_utc_offset_hours: i32,
    pub chart_tail: usize,
    pub provider_max_retries: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            history_range: DEFAULT_HISTORY_RANGE.to_string(),
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            report_utc_offset_hours: DEFAULT_REPORT_UTC_OFFSET_HOURS,
            chart_tail: DEFAULT_CHART_TAIL,
            provider_max_retries: DEFAULT_PROVIDER_MAX_RETRIES,
        }
    }
}

impl ServiceConfig {
    /// Read overrides from the process environment. Unparsable values fall
    /// back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: parse_var("PORT").unwrap_or(defaults.port),
            history_range: env::var("HISTORY_RANGE").unwrap_or(defaults.history_range),
            yahoo_base_url: env::var("YAHOO_BASE_URL").unwrap_or(defaults.yahoo_base_url),
            report_utc_offset_hours: parse_var("REPORT_UTC_OFFSET_HOURS")
                .filter(|h: &i32| (-23..=23).contains(h))
                .unwrap_or(defaults.report_utc_offset_hours),
            chart_tail: parse_var("CHART_TAIL")
                .filter(|t: &usize| *t > 0)
                .unwrap_or(defaults.chart_tail),
            provider_max_retries: parse_var("PROVIDER_MAX_RETRIES")
                .unwrap_or(defaults.provider_max_retries),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
