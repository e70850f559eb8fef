//! Synthetic quote generation.
//!
//! Produces deterministic-shaped values whenever the upstream is
//! unavailable: a fixed per-symbol base price table seeds a bounded
//! random walk. OHLC fields are shaped around the walked price but
//! `low <= price <= high` is not enforced by construction, matching
//! the upstream simulator this mirrors.

use async_trait::async_trait;
use chrono::{Datelike, Days, Utc};
use papertrade_core::error::MarketDataError;
use papertrade_core::traits::QuoteFeed;
use papertrade_core::types::{HistoricalPoint, IndexQuote, Quote, Timeframe};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Mutex;

/// Fixed base price table for the simulated NSE universe.
const BASE_PRICES: &[(&str, Decimal)] = &[
    ("NIFTY", dec!(22500)),
    ("SENSEX", dec!(74000)),
    ("RELIANCE", dec!(2540)),
    ("HDFCBANK", dec!(1560)),
    ("TCS", dec!(3850)),
    ("INFY", dec!(1640)),
    ("TATAMOTORS", dec!(850)),
    ("ICICIBANK", dec!(1020)),
];

/// Tracked indices: name, base value, jitter bound.
const INDICES: &[(&str, Decimal, i64)] = &[
    ("NIFTY 50", dec!(22500), 100),
    ("SENSEX", dec!(74000), 250),
    ("NIFTY BANK", dec!(48000), 150),
    ("NIFTY IT", dec!(36700), 125),
];

const GAINERS: &[(&str, Decimal)] = &[
    ("TATAMOTORS", dec!(850)),
    ("HDFCBANK", dec!(1560)),
    ("ICICIBANK", dec!(1020)),
];

const LOSERS: &[(&str, Decimal)] = &[
    ("RELIANCE", dec!(2540)),
    ("INFY", dec!(1640)),
    ("TCS", dec!(3850)),
];

/// Minutes into the session of the first intraday point (09:15 IST).
const SESSION_OPEN_MINUTES: i64 = 9 * 60 + 15;
/// Session length in minutes (09:15 to 15:45).
const SESSION_MINUTES: i64 = 390;

/// Top gainers and losers for the market overview.
#[derive(Debug, Clone)]
pub struct Movers {
    pub gainers: Vec<Quote>,
    pub losers: Vec<Quote>,
}

/// Quote generator seeded from a fixed base price table.
pub struct SyntheticFeed {
    rng: Mutex<StdRng>,
}

impl SyntheticFeed {
    /// Create a feed with an entropy-seeded generator.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a feed with a fixed seed for reproducible output.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Uniform decimal in `[lo, hi]` with two fractional digits.
    fn range(rng: &mut StdRng, lo: Decimal, hi: Decimal) -> Decimal {
        let lo_cents = (lo * dec!(100)).trunc().to_i64().unwrap_or(0);
        let hi_cents = (hi * dec!(100)).trunc().to_i64().unwrap_or(0);
        Decimal::new(rng.gen_range(lo_cents..=hi_cents), 2)
    }

    fn base_price(rng: &mut StdRng, symbol: &str) -> Decimal {
        BASE_PRICES
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, p)| *p)
            .unwrap_or_else(|| dec!(1000) + Self::range(rng, dec!(0), dec!(2000)))
    }

    fn shape_quote(rng: &mut StdRng, symbol: &str, price: Decimal, previous_close: Decimal) -> Quote {
        let open = price - Self::range(rng, dec!(0), dec!(10));
        let high = price + Self::range(rng, dec!(0), dec!(15));
        let low = price - Self::range(rng, dec!(0), dec!(15));
        let volume = rng.gen_range(100_000..=1_100_000);
        Quote::new(symbol, price, open, high, low, previous_close, volume)
    }

    fn label(timeframe: Timeframe, index: usize, count: usize) -> String {
        if timeframe.is_intraday() {
            let minutes = SESSION_OPEN_MINUTES + (index as i64) * SESSION_MINUTES / count as i64;
            format!("{:02}:{:02}", minutes / 60, minutes % 60)
        } else {
            let days_back = (count - 1 - index) as u64;
            let date = Utc::now()
                .date_naive()
                .checked_sub_days(Days::new(days_back))
                .unwrap_or_else(|| Utc::now().date_naive());
            format!("{}/{}", date.day(), date.month())
        }
    }

    /// Generate top gainers and losers with sign-constrained changes.
    pub fn top_movers(&self) -> Movers {
        let mut rng = self.rng.lock().unwrap();

        let mut build = |table: &[(&str, Decimal)], sign: Decimal| {
            table
                .iter()
                .map(|(symbol, base)| {
                    let change_pct = Self::range(&mut rng, dec!(0), dec!(3)) * sign;
                    let change = *base * change_pct / dec!(100);
                    Self::shape_quote(&mut rng, symbol, *base + change, *base)
                })
                .collect::<Vec<_>>()
        };

        Movers {
            gainers: build(GAINERS, Decimal::ONE),
            losers: build(LOSERS, -Decimal::ONE),
        }
    }
}

impl Default for SyntheticFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteFeed for SyntheticFeed {
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let mut rng = self.rng.lock().unwrap();
        let base = Self::base_price(&mut rng, symbol);
        let change = Self::range(&mut rng, dec!(-20), dec!(20));
        Ok(Self::shape_quote(&mut rng, symbol, base + change, base))
    }

    async fn fetch_indices(&self) -> Result<Vec<IndexQuote>, MarketDataError> {
        let mut rng = self.rng.lock().unwrap();

        Ok(INDICES
            .iter()
            .map(|(name, base, jitter)| {
                let jitter = Decimal::from(*jitter);
                let level = *base + Self::range(&mut rng, -jitter, jitter);
                let change = Self::range(&mut rng, dec!(-100), dec!(100));
                IndexQuote::new(*name, level + change, level)
            })
            .collect())
    }

    async fn fetch_history(
        &self,
        symbol: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<HistoricalPoint>, MarketDataError> {
        let mut rng = self.rng.lock().unwrap();
        let base = Self::base_price(&mut rng, symbol);
        let count = timeframe.point_count();
        let floor = base / dec!(2);
        let step_bound = base * dec!(0.02);

        let mut current = base;
        let mut points = Vec::with_capacity(count);

        for i in 0..count {
            let step = Self::range(&mut rng, -step_bound, step_bound);
            current = (current + step).max(floor);
            let price = current.round_dp(2);

            points.push(HistoricalPoint {
                label: Self::label(timeframe, i, count),
                price,
                open: Some(price - Self::range(&mut rng, dec!(0), dec!(10))),
                high: Some(price + Self::range(&mut rng, dec!(0), dec!(15))),
                low: Some(price - Self::range(&mut rng, dec!(0), dec!(15))),
                close: Some(price),
                volume: Some(rng.gen_range(100_000..=1_100_000)),
            });
        }

        Ok(points)
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}
