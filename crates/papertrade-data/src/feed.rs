//! Upstream feed with synthetic fallback.

use async_trait::async_trait;
use papertrade_core::error::MarketDataError;
use papertrade_core::traits::QuoteFeed;
use papertrade_core::types::{HistoricalPoint, IndexQuote, Quote, Timeframe};
use tracing::warn;

use crate::synthetic::SyntheticFeed;
use crate::upstream::UpstreamApi;

/// Feed that tries the upstream and falls back to synthetic data.
///
/// Total: none of the fetch methods ever return `Err`, so consumers
/// never branch on data availability. Fallbacks are logged at `warn`.
pub struct FallbackFeed {
    upstream: UpstreamApi,
    synthetic: SyntheticFeed,
}

impl FallbackFeed {
    pub fn new(upstream: UpstreamApi, synthetic: SyntheticFeed) -> Self {
        Self { upstream, synthetic }
    }

    /// The synthetic half, for callers that want generated data
    /// directly (top movers).
    pub fn synthetic(&self) -> &SyntheticFeed {
        &self.synthetic
    }
}

#[async_trait]
impl QuoteFeed for FallbackFeed {
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        match self.upstream.fetch_quote(symbol).await {
            Ok(quote) => Ok(quote),
            Err(err) => {
                warn!(symbol, error = %err, "upstream quote failed, serving synthetic");
                self.synthetic.fetch_quote(symbol).await
            }
        }
    }

    async fn fetch_indices(&self) -> Result<Vec<IndexQuote>, MarketDataError> {
        match self.upstream.fetch_indices().await {
            Ok(indices) => Ok(indices),
            Err(err) => {
                warn!(error = %err, "upstream indices failed, serving synthetic");
                self.synthetic.fetch_indices().await
            }
        }
    }

    async fn fetch_history(
        &self,
        symbol: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<HistoricalPoint>, MarketDataError> {
        match self.upstream.fetch_history(symbol, timeframe).await {
            Ok(points) => Ok(points),
            Err(err) => {
                warn!(symbol, %timeframe, error = %err, "upstream history failed, serving synthetic");
                self.synthetic.fetch_history(symbol, timeframe).await
            }
        }
    }

    fn name(&self) -> &str {
        "upstream-with-fallback"
    }
}
