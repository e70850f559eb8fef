//! Command implementations.

pub mod history;
pub mod indices;
pub mod movers;
pub mod orders;
pub mod portfolio;
pub mod quote;
pub mod settings;
pub mod trade;

use anyhow::Result;
use papertrade_broker::{EngineConfig, OrderEngine, PortfolioLedger, SettingsStore};
use papertrade_config::AppConfig;
use papertrade_core::traits::{QuoteFeed, SystemClock};
use papertrade_data::{FallbackFeed, QuoteCache, SyntheticFeed, UpstreamApi};
use std::sync::Arc;
use std::time::Duration;

/// The wired service graph: feed -> cache -> ledger -> engine.
///
/// Built once per invocation; all state lives for the process lifetime
/// only.
pub struct Services {
    pub feed: Arc<FallbackFeed>,
    pub cache: Arc<QuoteCache>,
    pub ledger: Arc<PortfolioLedger>,
    pub engine: OrderEngine,
    pub settings: SettingsStore,
    pub resolution_delay: Duration,
}

impl Services {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let upstream = UpstreamApi::new(
            &config.upstream.base_url,
            Duration::from_secs(config.upstream.timeout_secs),
        )?;
        let synthetic = match config.engine.seed {
            Some(seed) => SyntheticFeed::with_seed(seed),
            None => SyntheticFeed::new(),
        };
        let feed = Arc::new(FallbackFeed::new(upstream, synthetic));

        let cache = Arc::new(QuoteCache::with_clock(
            Arc::clone(&feed) as Arc<dyn QuoteFeed>,
            Arc::new(SystemClock),
            Duration::from_secs(config.cache.ttl_secs),
        ));

        let ledger = Arc::new(PortfolioLedger::new(Arc::clone(&cache)));

        let resolution_delay = Duration::from_millis(config.engine.resolution_delay_ms);
        let engine_config = EngineConfig {
            fill_probability: config.engine.fill_probability,
            resolution_delay,
        };
        let engine = match config.engine.seed {
            Some(seed) => OrderEngine::with_seed(Arc::clone(&ledger), engine_config, seed),
            None => OrderEngine::new(Arc::clone(&ledger), engine_config),
        };

        Ok(Self {
            feed,
            cache,
            ledger,
            engine,
            settings: SettingsStore::new(config.trade_defaults()),
            resolution_delay,
        })
    }
}
