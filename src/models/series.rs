//! Raw daily price series as delivered by a market data provider.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// One trading date of OHLCV data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Bars for one symbol, strictly increasing by date.
///
/// The ordering invariant is checked at construction so every consumer can
/// binary-search the date index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl TimeSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, PipelineError> {
        let symbol = symbol.into();

        for pair in bars.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(PipelineError::InvalidSeries {
                    series: symbol,
                    reason: format!(
                        "dates must be strictly increasing ({} followed by {})",
                        pair[0].date, pair[1].date
                    ),
                });
            }
        }

        if let Some(bar) = bars.iter().find(|b| !b.close.is_finite()) {
            return Err(PipelineError::InvalidSeries {
                series: symbol,
                reason: format!("non-finite close on {}", bar.date),
            });
        }

        Ok(Self { symbol, bars })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume as f64).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }
}
