//! Per-asset analysis: fetch every series an asset needs, run the signal
//! pipeline and shape the result for the API.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use futures_util::future::{join_all, try_join4};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{AssetProfile, ServiceConfig};
use crate::core::pipeline::SignalPipeline;
use crate::error::AnalysisError;
use crate::metrics::Metrics;
use crate::models::chart::ChartFrame;
use crate::services::market_data::MarketDataProvider;
use crate::signals::{MacroInputs, MacroRole};

pub const REPORT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Latest state of one asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetSummary {
    pub name: String,
    pub symbol: String,
    /// Date of the latest signal row.
    pub date: NaiveDate,
    /// Close of the latest primary bar, which can be newer than `date`.
    pub price: f64,
    pub score: u8,
    pub buy: bool,
    pub sell: bool,
    pub unit: String,
    pub chart: ChartFrame,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AssetReport {
    Ok(AssetSummary),
    Failed { name: String, error: String },
}

impl AssetReport {
    pub fn name(&self) -> &str {
        match self {
            AssetReport::Ok(summary) => &summary.name,
            AssetReport::Failed { name, .. } => name,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, AssetReport::Ok(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub status: String,
    pub time: String,
    pub results: Vec<AssetReport>,
}

pub struct AnalysisService {
    provider: Arc<dyn MarketDataProvider>,
    profiles: Vec<AssetProfile>,
    config: ServiceConfig,
    metrics: Option<Arc<Metrics>>,
}

impl AnalysisService {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        profiles: Vec<AssetProfile>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            provider,
            profiles,
            config,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn profiles(&self) -> &[AssetProfile] {
        &self.profiles
    }

    pub fn profile(&self, symbol: &str) -> Option<&AssetProfile> {
        self.profiles
            .iter()
            .find(|p| p.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Analyse every configured asset concurrently.
    pub async fn run_batch(&self) -> AnalysisReport {
        self.run_batch_at(Utc::now()).await
    }

    pub async fn run_batch_at(&self, now: DateTime<Utc>) -> AnalysisReport {
        let results = join_all(self.profiles.iter().map(|p| self.analyze(p))).await;
        let failed = results.iter().filter(|r| !r.is_ok()).count();
        info!(
            assets = results.len(),
            failed = failed,
            "analysis batch complete"
        );

        AnalysisReport {
            status: "success".to_string(),
            time: self.report_time(now),
            results,
        }
    }

    /// Analyse one asset; failures become a report entry rather than an error.
    pub async fn analyze(&self, profile: &AssetProfile) -> AssetReport {
        if let Some(metrics) = &self.metrics {
            metrics.pipeline_runs_total.inc();
            metrics.pipeline_runs_active.inc();
        }

        let outcome = self.try_analyze(profile).await;

        if let Some(metrics) = &self.metrics {
            metrics.pipeline_runs_active.dec();
            if outcome.is_err() {
                metrics.pipeline_failures_total.inc();
            }
        }

        match outcome {
            Ok(summary) => AssetReport::Ok(summary),
            Err(e) => {
                warn!(symbol = %profile.symbol, error = %e, "asset analysis failed");
                AssetReport::Failed {
                    name: profile.display_name(),
                    error: e.to_string(),
                }
            }
        }
    }

    pub async fn try_analyze(&self, profile: &AssetProfile) -> Result<AssetSummary, AnalysisError> {
        let pipeline = SignalPipeline::for_profile(profile)?;
        let range = self.config.history_range.as_str();

        let fetched = try_join4(
            self.provider.fetch(&profile.symbol, range),
            self.provider.fetch(&profile.baseline, range),
            self.provider.fetch(&profile.currency, range),
            self.provider.fetch(&profile.rates, range),
        )
        .await;
        if let Some(metrics) = &self.metrics {
            metrics
                .provider_available
                .set(if fetched.is_ok() { 1.0 } else { 0.0 });
        }
        let (primary, baseline, currency, rates) = fetched?;

        let mut macros = MacroInputs::new();
        macros.insert(MacroRole::Currency, &currency);
        macros.insert(MacroRole::Rates, &rates);

        let output = pipeline.compute_detailed(&primary, &baseline, &macros)?;

        let skipped = output.scores.skipped().len();
        if skipped > 0 {
            warn!(symbol = %profile.symbol, skipped = skipped, "macro dates skipped");
        }
        if let Some(metrics) = &self.metrics {
            metrics.macro_dates_skipped_total.inc_by(skipped as u64);
        }

        let no_signals = || AnalysisError::NoSignals {
            symbol: profile.symbol.clone(),
        };
        let last = output.table.last().ok_or_else(no_signals)?;
        let price = primary.last().ok_or_else(no_signals)?.close;

        Ok(AssetSummary {
            name: profile.display_name(),
            symbol: profile.symbol.clone(),
            date: last.date,
            price,
            score: last.macro_score,
            buy: last.final_buy,
            sell: last.sell,
            unit: profile.unit.clone(),
            chart: ChartFrame::from_table(&output.table, self.config.chart_tail),
        })
    }

    fn report_time(&self, now: DateTime<Utc>) -> String {
        let offset = FixedOffset::east_opt(self.config.report_utc_offset_hours * 3600)
            .unwrap_or_else(|| Utc.fix());
        now.with_timezone(&offset).format(REPORT_TIME_FORMAT).to_string()
    }
}
