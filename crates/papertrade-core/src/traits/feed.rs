//! Quote feed trait definition.

use crate::error::MarketDataError;
use crate::types::{HistoricalPoint, IndexQuote, Quote, Timeframe};
use async_trait::async_trait;

/// Trait for quote sources.
///
/// Implemented by the upstream HTTP adapter, the synthetic generator,
/// and the fallback composition of the two. The cache layer only talks
/// to feeds through this trait, so tests can substitute fixed fakes.
#[async_trait]
pub trait QuoteFeed: Send + Sync {
    /// Fetch the current quote for a symbol.
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, MarketDataError>;

    /// Fetch the tracked market indices.
    async fn fetch_indices(&self) -> Result<Vec<IndexQuote>, MarketDataError>;

    /// Fetch a historical series for a symbol.
    ///
    /// # Returns
    /// Points ordered from oldest to newest, with the count determined
    /// by the timeframe.
    async fn fetch_history(
        &self,
        symbol: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<HistoricalPoint>, MarketDataError>;

    /// Get the feed name for logging.
    fn name(&self) -> &str;
}
