//! Volatility indicators: return volatility

pub mod returns;

pub use returns::*;
