//! Macro-aware buy/sell signal engine.
//!
//! Annotates an asset's daily bars with technical indicators, scores the macro
//! environment (currency, rates, benchmark trend) for every trading date and
//! fuses both into per-date buy/sell flags.

pub mod alignment;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;

pub use error::{AnalysisError, PipelineError, ProviderError, SkipReason};
