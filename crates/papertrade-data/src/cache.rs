//! Staleness-bound quote cache.

use papertrade_core::traits::{Clock, QuoteFeed, SystemClock};
use papertrade_core::types::{HistoricalPoint, IndexQuote, Quote, Timeframe};
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::warn;

/// Default staleness bound for quotes and indices.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15);

struct CacheEntry<T> {
    value: T,
    fetched_at: Instant,
}

#[derive(Default)]
struct CacheState {
    quotes: HashMap<String, CacheEntry<Quote>>,
    indices: Option<CacheEntry<Vec<IndexQuote>>>,
}

/// Cache mediating between the quote feed and consumers.
///
/// Entries younger than the TTL are returned unchanged; a fresh fetch
/// replaces the entry as a whole unit. When the feed fails, the last
/// cached value wins even if stale, and a static safe default covers
/// the cold-start case. `quote` and `indices` therefore never fail.
pub struct QuoteCache {
    feed: Arc<dyn QuoteFeed>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    state: Mutex<CacheState>,
}

impl QuoteCache {
    /// Create a cache over a feed with the default TTL and wall clock.
    pub fn new(feed: Arc<dyn QuoteFeed>) -> Self {
        Self::with_clock(feed, Arc::new(SystemClock), DEFAULT_TTL)
    }

    /// Create a cache with an explicit clock and TTL.
    pub fn with_clock(feed: Arc<dyn QuoteFeed>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            feed,
            clock,
            ttl,
            state: Mutex::new(CacheState::default()),
        }
    }

    fn is_fresh(&self, fetched_at: Instant) -> bool {
        self.clock.now().saturating_duration_since(fetched_at) < self.ttl
    }

    /// Get the quote for a symbol, fetching through the feed when the
    /// cached entry is missing or older than the TTL.
    pub async fn quote(&self, symbol: &str) -> Quote {
        {
            let state = self.state.lock().unwrap();
            if let Some(entry) = state.quotes.get(symbol) {
                if self.is_fresh(entry.fetched_at) {
                    return entry.value.clone();
                }
            }
        }

        match self.feed.fetch_quote(symbol).await {
            Ok(quote) => {
                let mut state = self.state.lock().unwrap();
                state.quotes.insert(
                    symbol.to_string(),
                    CacheEntry {
                        value: quote.clone(),
                        fetched_at: self.clock.now(),
                    },
                );
                quote
            }
            Err(err) => {
                warn!(symbol, error = %err, "quote fetch failed, serving stale or default");
                let state = self.state.lock().unwrap();
                state
                    .quotes
                    .get(symbol)
                    .map(|entry| entry.value.clone())
                    .unwrap_or_else(|| Quote::fallback(symbol))
            }
        }
    }

    /// Get the tracked indices with the same staleness and fallback
    /// rules as [`quote`](Self::quote).
    pub async fn indices(&self) -> Vec<IndexQuote> {
        {
            let state = self.state.lock().unwrap();
            if let Some(entry) = &state.indices {
                if self.is_fresh(entry.fetched_at) {
                    return entry.value.clone();
                }
            }
        }

        match self.feed.fetch_indices().await {
            Ok(indices) => {
                let mut state = self.state.lock().unwrap();
                state.indices = Some(CacheEntry {
                    value: indices.clone(),
                    fetched_at: self.clock.now(),
                });
                indices
            }
            Err(err) => {
                warn!(error = %err, "indices fetch failed, serving stale or default");
                let state = self.state.lock().unwrap();
                state
                    .indices
                    .as_ref()
                    .map(|entry| entry.value.clone())
                    .unwrap_or_else(default_indices)
            }
        }
    }

    /// Fetch a historical series. Never cached; each request produces a
    /// fresh series. Feed failures degrade to a flat default series.
    pub async fn history(&self, symbol: &str, timeframe: Timeframe) -> Vec<HistoricalPoint> {
        match self.feed.fetch_history(symbol, timeframe).await {
            Ok(points) => points,
            Err(err) => {
                warn!(symbol, %timeframe, error = %err, "history fetch failed, serving default");
                default_history()
            }
        }
    }
}

/// Static index table served when no fetch ever succeeded.
fn default_indices() -> Vec<IndexQuote> {
    vec![
        IndexQuote::new("NIFTY 50", dec!(22564.30), dec!(22439.95)),
        IndexQuote::new("SENSEX", dec!(74108.75), dec!(73696.20)),
        IndexQuote::new("NIFTY BANK", dec!(48121.90), dec!(47886.45)),
        IndexQuote::new("NIFTY IT", dec!(36789.25), dec!(37105.05)),
    ]
}

/// Minutes into the day of the first placeholder point (09:15 IST).
const PLACEHOLDER_OPEN_MINUTES: i64 = 9 * 60 + 15;

/// Flat placeholder series for cold-start history failures, labelled in
/// ten-minute steps from the session open.
fn default_history() -> Vec<HistoricalPoint> {
    (0..10)
        .map(|i| {
            let minutes = PLACEHOLDER_OPEN_MINUTES + i * 10;
            HistoricalPoint {
                label: format!("{:02}:{:02}", minutes / 60, minutes % 60),
                price: dec!(1000) + dec!(10) * rust_decimal::Decimal::from(i),
                open: None,
                high: None,
                low: None,
                close: None,
                volume: None,
            }
        })
        .collect()
}
