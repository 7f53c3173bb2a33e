//! Shared helpers for integration tests

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use macroscope::models::series::{Bar, TimeSeries};
use macroscope::services::market_data::MarketDataProvider;
use macroscope::ProviderError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn day(n: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(n)
}

pub fn series(symbol: &str, start: i64, first: f64, step: f64, count: usize) -> TimeSeries {
    let bars = (0..count)
        .map(|i| {
            let close = first + step * i as f64;
            let volume = if i % 2 == 0 { 1_000 } else { 3_000 };
            Bar::new(day(start + i as i64), close, close, close, close, volume)
        })
        .collect();
    TimeSeries::new(symbol, bars).unwrap()
}

/// Serves canned series by symbol; anything else is not available.
#[derive(Default)]
pub struct StubProvider {
    series: HashMap<String, TimeSeries>,
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn with(mut self, series: TimeSeries) -> Self {
        self.series.insert(series.symbol().to_string(), series);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataProvider for StubProvider {
    async fn fetch(&self, symbol: &str, _range: &str) -> Result<TimeSeries, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.series
            .get(symbol)
            .cloned()
            .ok_or_else(|| ProviderError::NotAvailable {
                symbol: symbol.to_string(),
                reason: "no canned series".to_string(),
            })
    }
}

/// Rising primary with a macro backdrop where every equity condition holds.
pub fn favourable_provider() -> StubProvider {
    StubProvider::default()
        .with(series("GOOD", 0, 100.0, 1.0, 100))
        .with(series("BASE", -80, 1_000.0, 2.0, 180))
        .with(series("DX-Y.NYB", -80, 120.0, -0.1, 180))
        .with(series("^TNX", -80, 5.0, -0.01, 180))
}
