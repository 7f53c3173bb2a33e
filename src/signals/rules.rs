//! Macro condition model and the per-asset-class scoring rules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::alignment::AlignPolicy;
use crate::error::SkipReason;
use crate::indicators::trend::trailing_slope;
use crate::signals::macro_score::PreparedSeries;

/// Every macro series must have this many observations before the aligned
/// position, whatever its checks read.
pub const MIN_MACRO_LOOKBACK: usize = 5;

/// Which macro input a condition reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum MacroRole {
    /// Dollar index or other funding currency.
    Currency,
    /// Reference interest rate.
    Rates,
    /// Benchmark equity index; the same series the primary is measured against.
    Benchmark,
}

impl MacroRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MacroRole::Currency => "currency",
            MacroRole::Rates => "rates",
            MacroRole::Benchmark => "benchmark",
        }
    }
}

/// A per-date column derived from a macro series' closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "window", rename_all = "PascalCase")]
pub enum SeriesField {
    Close,
    MovingAverage(usize),
    /// Rolling standard deviation of daily returns.
    ReturnVolatility(usize),
}

impl SeriesField {
    pub fn label(&self) -> String {
        match self {
            SeriesField::Close => "close".to_string(),
            SeriesField::MovingAverage(n) => format!("ma{}", n),
            SeriesField::ReturnVolatility(n) => format!("vol{}", n),
        }
    }
}

/// A single comparison over one macro series at the aligned position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "PascalCase")]
pub enum MacroCheck {
    /// `field[t] < field[t - lag]`
    FallingVersusLag { field: SeriesField, lag: usize },
    /// `field[t] > field[t - lag]`
    RisingVersusLag { field: SeriesField, lag: usize },
    /// `field[t] > reference[t]`
    AboveField { field: SeriesField, reference: SeriesField },
    /// `field[t] < reference[t]`
    BelowField { field: SeriesField, reference: SeriesField },
    /// OLS slope of `field` over the trailing `window` observations is negative.
    NegativeSlope { field: SeriesField, window: usize },
}

impl MacroCheck {
    /// Observations needed before the aligned position.
    pub fn lookback(&self) -> usize {
        match self {
            MacroCheck::FallingVersusLag { lag, .. } | MacroCheck::RisingVersusLag { lag, .. } => {
                *lag
            }
            MacroCheck::NegativeSlope { window, .. } => window.saturating_sub(1),
            MacroCheck::AboveField { .. } | MacroCheck::BelowField { .. } => 0,
        }
    }

    pub fn fields(&self) -> Vec<SeriesField> {
        match self {
            MacroCheck::FallingVersusLag { field, .. }
            | MacroCheck::RisingVersusLag { field, .. }
            | MacroCheck::NegativeSlope { field, .. } => vec![*field],
            MacroCheck::AboveField { field, reference } | MacroCheck::BelowField { field, reference } => {
                vec![*field, *reference]
            }
        }
    }

    fn evaluate(&self, pos: usize, series: &PreparedSeries) -> Result<bool, SkipReason> {
        match self {
            MacroCheck::FallingVersusLag { field, lag } => {
                Ok(series.value(*field, pos)? < series.value(*field, pos - lag)?)
            }
            MacroCheck::RisingVersusLag { field, lag } => {
                Ok(series.value(*field, pos)? > series.value(*field, pos - lag)?)
            }
            MacroCheck::AboveField { field, reference } => {
                Ok(series.value(*field, pos)? > series.value(*reference, pos)?)
            }
            MacroCheck::BelowField { field, reference } => {
                Ok(series.value(*field, pos)? < series.value(*reference, pos)?)
            }
            MacroCheck::NegativeSlope { field, window } => {
                let slope = trailing_slope(series.column(*field)?, pos, *window)
                    .ok_or_else(|| series.undefined(*field))?;
                Ok(slope < 0.0)
            }
        }
    }
}

/// One scored condition: all of its checks must hold on the aligned date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroCondition {
    pub id: String,
    pub series: MacroRole,
    #[serde(default = "default_macro_policy")]
    pub policy: AlignPolicy,
    pub checks: Vec<MacroCheck>,
}

fn default_macro_policy() -> AlignPolicy {
    AlignPolicy::Pad
}

impl MacroCondition {
    pub fn new(id: impl Into<String>, series: MacroRole, checks: Vec<MacroCheck>) -> Self {
        Self {
            id: id.into(),
            series,
            policy: AlignPolicy::Pad,
            checks,
        }
    }

    pub fn lookback(&self) -> usize {
        self.checks
            .iter()
            .map(MacroCheck::lookback)
            .fold(MIN_MACRO_LOOKBACK, usize::max)
    }

    /// Every check is evaluated, so an undefined input anywhere skips the
    /// date no matter how the other checks come out.
    pub fn evaluate(&self, date: NaiveDate, series: &PreparedSeries) -> Result<bool, SkipReason> {
        let pos = series
            .index()
            .resolve_with_lookback(date, self.policy, self.lookback())?;

        let mut passed = true;
        for check in &self.checks {
            passed &= check.evaluate(pos, series)?;
        }
        Ok(passed)
    }
}

/// Ordered set of independent macro conditions; the score is how many hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRule {
    pub name: String,
    pub conditions: Vec<MacroCondition>,
}

impl ScoringRule {
    /// Equities: dollar and 10y yield below their level five sessions ago,
    /// benchmark index above its 60-day average.
    pub fn equity() -> Self {
        Self {
            name: "equity".to_string(),
            conditions: vec![
                MacroCondition::new(
                    "dollar_weakening",
                    MacroRole::Currency,
                    vec![MacroCheck::FallingVersusLag {
                        field: SeriesField::Close,
                        lag: 5,
                    }],
                ),
                MacroCondition::new(
                    "rates_declining",
                    MacroRole::Rates,
                    vec![MacroCheck::FallingVersusLag {
                        field: SeriesField::Close,
                        lag: 5,
                    }],
                ),
                MacroCondition::new(
                    "benchmark_uptrend",
                    MacroRole::Benchmark,
                    vec![MacroCheck::AboveField {
                        field: SeriesField::Close,
                        reference: SeriesField::MovingAverage(60),
                    }],
                ),
            ],
        }
    }

    /// Crypto: dollar MA20 under a falling MA60, yield MA20 lower than five
    /// sessions ago, benchmark above its MA60 with contracting volatility.
    pub fn crypto() -> Self {
        Self {
            name: "crypto".to_string(),
            conditions: vec![
                MacroCondition::new(
                    "dollar_weakening",
                    MacroRole::Currency,
                    vec![
                        MacroCheck::BelowField {
                            field: SeriesField::MovingAverage(20),
                            reference: SeriesField::MovingAverage(60),
                        },
                        MacroCheck::NegativeSlope {
                            field: SeriesField::MovingAverage(60),
                            window: 10,
                        },
                    ],
                ),
                MacroCondition::new(
                    "rates_declining",
                    MacroRole::Rates,
                    vec![MacroCheck::FallingVersusLag {
                        field: SeriesField::MovingAverage(20),
                        lag: 5,
                    }],
                ),
                MacroCondition::new(
                    "benchmark_calm_uptrend",
                    MacroRole::Benchmark,
                    vec![
                        MacroCheck::AboveField {
                            field: SeriesField::Close,
                            reference: SeriesField::MovingAverage(60),
                        },
                        MacroCheck::FallingVersusLag {
                            field: SeriesField::ReturnVolatility(10),
                            lag: 5,
                        },
                    ],
                ),
            ],
        }
    }

    pub fn max_score(&self) -> usize {
        self.conditions.len()
    }

    pub fn roles(&self) -> BTreeSet<MacroRole> {
        self.conditions.iter().map(|c| c.series).collect()
    }

    /// Derived fields each role's series must provide.
    pub fn fields_for(&self, role: MacroRole) -> BTreeSet<SeriesField> {
        self.conditions
            .iter()
            .filter(|c| c.series == role)
            .flat_map(|c| c.checks.iter().flat_map(MacroCheck::fields))
            .collect()
    }
}
