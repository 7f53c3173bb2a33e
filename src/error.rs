//! Error types shared across the engine layers.

use chrono::NaiveDate;
use thiserror::Error;

/// Why a single date was left out of the macro score table.
///
/// These are never fatal: the date is dropped and the reason is kept on the
/// table for inspection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkipReason {
    #[error("{series}: {date} precedes the first observation")]
    UnresolvableAlignment { series: String, date: NaiveDate },

    #[error("{series}: index {index} has fewer than {required} prior observations")]
    InsufficientHistory {
        series: String,
        index: usize,
        required: usize,
    },

    #[error("{series}: {field} is undefined at the aligned position")]
    UndefinedValue { series: String, field: String },
}

/// Symbol-level failure of a pipeline run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("missing input series: {series}")]
    MissingInput { series: String },

    #[error("invalid series {series}: {reason}")]
    InvalidSeries { series: String, reason: String },

    #[error("insufficient history for {series}: {observations} observations, {required} required")]
    InsufficientHistory {
        series: String,
        observations: usize,
        required: usize,
    },

    #[error("no scorable dates for {symbol} ({skipped} skipped)")]
    NoScorableDates { symbol: String, skipped: usize },

    #[error("required column absent after merge: {column}")]
    MissingColumn { column: &'static str },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Failure reported by a market data provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{symbol} not available: {reason}")]
    NotAvailable { symbol: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

impl ProviderError {
    /// Whether retrying the request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Http(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.status().map(|s| s.is_server_error() || s.as_u16() == 429).unwrap_or(false)
            }
            ProviderError::NotAvailable { .. } | ProviderError::Parse(_) => false,
        }
    }
}

/// Failure analysing one asset end to end.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("no signal rows for {symbol}: primary and baseline share no dates")]
    NoSignals { symbol: String },
}
