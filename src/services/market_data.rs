//! Market data provider interface.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::models::series::TimeSeries;

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily bars for `symbol` over `range` (e.g. `1y`, `6mo`).
    ///
    /// Unknown symbols and unreachable backends fail with
    /// [`ProviderError::NotAvailable`] or a transport error.
    async fn fetch(&self, symbol: &str, range: &str) -> Result<TimeSeries, ProviderError>;
}
