//! Trend indicators: moving average, linear slope

pub mod slope;
pub mod sma;

pub use slope::*;
pub use sma::*;
