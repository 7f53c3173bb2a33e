//! External collaborators: market data retrieval and the per-asset analysis
//! service built on the pipeline.

pub mod analysis;
pub mod market_data;
pub mod yahoo;

pub use analysis::{AnalysisReport, AnalysisService, AssetReport, AssetSummary};
pub use market_data::MarketDataProvider;
pub use yahoo::YahooChartProvider;
