use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A bar annotated with the derived per-date fields.
///
/// Windowed fields are `None` during their warm-up span. `ma_slope` follows
/// the slope policy and reads `0.0` until its window is fully defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ma_short: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ma_long: Option<f64>,
    pub ma_slope: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_ma: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_ratio: Option<f64>,
    pub internal_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorFrame {
    symbol: String,
    rows: Vec<IndicatorRow>,
    warmup: usize,
}

impl IndicatorFrame {
    pub fn new(symbol: impl Into<String>, rows: Vec<IndicatorRow>, warmup: usize) -> Self {
        Self {
            symbol: symbol.into(),
            rows,
            warmup,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn rows(&self) -> &[IndicatorRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of leading rows whose windowed fields are not all defined.
    pub fn warmup(&self) -> usize {
        self.warmup
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&IndicatorRow> {
        self.rows
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|i| &self.rows[i])
    }
}
