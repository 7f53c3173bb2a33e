//! Yahoo Finance chart API provider.

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, NaiveDate};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::error::ProviderError;
use crate::models::series::{Bar, TimeSeries};
use crate::services::market_data::MarketDataProvider;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; macroscope/0.1)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<QuoteColumns>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

pub struct YahooChartProvider {
    base_url: String,
    client: reqwest::Client,
    max_retries: usize,
}

impl YahooChartProvider {
    pub fn new(base_url: impl Into<String>, max_retries: usize) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_client(base_url, client).with_max_retries(max_retries))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
            max_retries: 0,
        }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn chart_url(&self, symbol: &str, range: &str) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ProviderError::Parse(format!("invalid base url {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::Parse(format!("base url cannot hold a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);
        url.query_pairs_mut()
            .append_pair("range", range)
            .append_pair("interval", "1d");
        Ok(url)
    }

    async fn fetch_once(&self, symbol: &str, range: &str) -> Result<TimeSeries, ProviderError> {
        let url = self.chart_url(symbol, range)?;
        debug!(symbol = %symbol, url = %url, "requesting chart");

        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            let reason = response
                .json::<ChartResponse>()
                .await
                .ok()
                .and_then(|body| body.chart.error)
                .map(|e| format!("{}: {}", e.code, e.description))
                .unwrap_or_else(|| "symbol not found".to_string());
            return Err(ProviderError::NotAvailable {
                symbol: symbol.to_string(),
                reason,
            });
        }

        let body: ChartResponse = response.error_for_status()?.json().await?;
        parse_chart(symbol, body)
    }
}

#[async_trait]
impl MarketDataProvider for YahooChartProvider {
    async fn fetch(&self, symbol: &str, range: &str) -> Result<TimeSeries, ProviderError> {
        let backoff = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(250))
            .with_max_times(self.max_retries);

        (|| async { self.fetch_once(symbol, range).await })
            .retry(backoff)
            .sleep(tokio::time::sleep)
            .when(ProviderError::is_transient)
            .notify(|err: &ProviderError, delay: Duration| {
                warn!(symbol = %symbol, error = %err, delay_ms = delay.as_millis() as u64, "retrying chart request");
            })
            .await
    }
}

fn parse_chart(symbol: &str, body: ChartResponse) -> Result<TimeSeries, ProviderError> {
    if let Some(err) = body.chart.error {
        return Err(ProviderError::NotAvailable {
            symbol: symbol.to_string(),
            reason: format!("{}: {}", err.code, err.description),
        });
    }

    let result = body
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.swap_remove(0)) })
        .ok_or_else(|| ProviderError::NotAvailable {
            symbol: symbol.to_string(),
            reason: "empty chart result".to_string(),
        })?;

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let offset = result.meta.gmtoffset;

    let mut bars: Vec<Bar> = Vec::with_capacity(result.timestamp.len());
    for (i, ts) in result.timestamp.iter().enumerate() {
        let Some(close) = column_at(&quote.close, i) else {
            continue;
        };
        let date = local_date(*ts, offset).ok_or_else(|| {
            ProviderError::Parse(format!("timestamp out of range: {}", ts))
        })?;
        let bar = Bar::new(
            date,
            column_at(&quote.open, i).unwrap_or(close),
            column_at(&quote.high, i).unwrap_or(close),
            column_at(&quote.low, i).unwrap_or(close),
            close,
            column_at(&quote.volume, i).map(|v| v.max(0.0).round() as u64).unwrap_or(0),
        );

        // A live session can repeat the last date; the later bar wins.
        match bars.last().map(|b| b.date) {
            Some(last) if last > bar.date => continue,
            Some(last) if last == bar.date => {
                bars.pop();
            }
            _ => {}
        }
        bars.push(bar);
    }

    TimeSeries::new(symbol, bars).map_err(|e| ProviderError::Parse(e.to_string()))
}

fn column_at(column: &[Option<f64>], i: usize) -> Option<f64> {
    column.get(i).copied().flatten().filter(|v| v.is_finite())
}

/// Exchange-local calendar date of a bar timestamp.
fn local_date(timestamp: i64, gmtoffset: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp + gmtoffset, 0).map(|dt| dt.date_naive())
}
