//! Asset profiles: what to analyse and which rules apply to it.

use serde::{Deserialize, Serialize};

use crate::alignment::AlignPolicy;
use crate::config::pipeline::{FusionConfig, PipelineConfig};
use crate::signals::rules::{MacroRole, ScoringRule};

pub const DOLLAR_INDEX: &str = "DX-Y.NYB";
pub const US_10Y_YIELD: &str = "^TNX";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Equity,
    Crypto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetProfile {
    pub symbol: String,
    pub name: String,
    /// Currency the price is quoted in.
    pub unit: String,
    pub class: AssetClass,
    /// Benchmark the primary is measured against; also the benchmark macro input.
    pub baseline: String,
    pub currency: String,
    pub rates: String,
    pub rule: ScoringRule,
    pub pipeline: PipelineConfig,
}

impl AssetProfile {
    /// Equities align their baseline as-of and only sell in a downtrend.
    pub fn equity(symbol: &str, name: &str, unit: &str, baseline: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            unit: unit.to_string(),
            class: AssetClass::Equity,
            baseline: baseline.to_string(),
            currency: DOLLAR_INDEX.to_string(),
            rates: US_10Y_YIELD.to_string(),
            rule: ScoringRule::equity(),
            pipeline: PipelineConfig::default(),
        }
    }

    /// Crypto trades on days the equity baseline is closed, so the baseline
    /// is aligned to the nearest session, and a weak macro score alone sells.
    pub fn crypto(symbol: &str, name: &str, unit: &str, baseline: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            unit: unit.to_string(),
            class: AssetClass::Crypto,
            baseline: baseline.to_string(),
            currency: DOLLAR_INDEX.to_string(),
            rates: US_10Y_YIELD.to_string(),
            rule: ScoringRule::crypto(),
            pipeline: PipelineConfig {
                fusion: FusionConfig {
                    baseline_policy: AlignPolicy::Nearest,
                    sell_requires_downtrend: false,
                    ..FusionConfig::default()
                },
                ..PipelineConfig::default()
            },
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.symbol)
    }

    /// Macro series to fetch besides the baseline, by role.
    pub fn macro_symbols(&self) -> Vec<(MacroRole, &str)> {
        vec![
            (MacroRole::Currency, self.currency.as_str()),
            (MacroRole::Rates, self.rates.as_str()),
        ]
    }
}

pub fn default_profiles() -> Vec<AssetProfile> {
    vec![
        AssetProfile::crypto("BTC-USD", "Bitcoin", "USD", "^GSPC"),
        AssetProfile::equity("066570.KS", "LG Electronics", "KRW", "^KS11"),
        AssetProfile::equity("005930.KS", "Samsung Electronics", "KRW", "^KS11"),
    ]
}

pub fn find_profile(symbol: &str) -> Option<AssetProfile> {
    default_profiles()
        .into_iter()
        .find(|p| p.symbol.eq_ignore_ascii_case(symbol))
}
