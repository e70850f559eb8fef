//! Portfolio ledger: holdings, fills, and derived snapshots.

use chrono::{Datelike, Utc};
use papertrade_core::error::OrderError;
use papertrade_core::types::{AllocationSlice, Holding, Order, PortfolioSnapshot, Side};
use papertrade_data::QuoteCache;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Symbols bucketed as large cap for allocation purposes.
const LARGE_CAP: &[&str] = &["RELIANCE", "HDFCBANK", "TCS"];
/// Symbols bucketed as mid cap; everything else is small cap.
const MID_CAP: &[&str] = &["TATAMOTORS"];

/// Fixed daily P&L percentage table driving day/month change figures.
///
/// Indexed by day of month; the month-to-date figure is the running sum
/// of entries for the elapsed days. Deterministic for a given date.
const DAILY_PNL_PCT: [Decimal; 30] = [
    dec!(0.5), dec!(-0.3), dec!(0.8), dec!(1.2), dec!(-0.6), dec!(0.3),
    dec!(-0.2), dec!(0.9), dec!(1.3), dec!(-0.4), dec!(0.7), dec!(1.1),
    dec!(-0.5), dec!(0.6), dec!(1.0), dec!(-0.3), dec!(0.4), dec!(0.8),
    dec!(-0.2), dec!(1.5), dec!(-0.7), dec!(0.3), dec!(0.9), dec!(-0.4),
    dec!(0.7), dec!(-0.3), dec!(0.5), dec!(-0.2), dec!(0.4), dec!(0.6),
];

/// The set of positions and the math deriving valuation from them.
///
/// Fills mutate holdings immediately; last traded prices are refreshed
/// lazily from the quote cache when a snapshot is requested, not by the
/// fill itself.
pub struct PortfolioLedger {
    cache: Arc<QuoteCache>,
    holdings: Mutex<HashMap<String, Holding>>,
}

impl PortfolioLedger {
    /// Create an empty ledger repricing against the given cache.
    pub fn new(cache: Arc<QuoteCache>) -> Self {
        Self {
            cache,
            holdings: Mutex::new(HashMap::new()),
        }
    }

    /// Current holdings, sorted by symbol.
    pub fn holdings(&self) -> Vec<Holding> {
        let holdings = self.holdings.lock().unwrap();
        let mut list: Vec<Holding> = holdings.values().cloned().collect();
        list.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        list
    }

    /// Apply an executed order to the holdings.
    ///
    /// Buys fold into the weighted-average cost; sells leave the average
    /// untouched and fail without mutation when the held quantity is
    /// insufficient. A holding sold down to zero is removed.
    pub fn apply_fill(&self, order: &Order) -> Result<(), OrderError> {
        let mut holdings = self.holdings.lock().unwrap();

        match order.side {
            Side::Buy => {
                match holdings.get_mut(&order.symbol) {
                    Some(holding) => holding.add(order.qty, order.price),
                    None => {
                        holdings.insert(
                            order.symbol.clone(),
                            Holding::open(&order.symbol, order.qty, order.price),
                        );
                    }
                }
            }
            Side::Sell => {
                let holding = holdings
                    .get_mut(&order.symbol)
                    .ok_or_else(|| OrderError::NoPosition(order.symbol.clone()))?;

                if order.qty > holding.qty {
                    return Err(OrderError::InsufficientQuantity {
                        symbol: order.symbol.clone(),
                        requested: order.qty,
                        held: holding.qty,
                    });
                }

                holding.reduce(order.qty);
                if holding.qty == 0 {
                    holdings.remove(&order.symbol);
                }
            }
        }

        info!(order_id = %order.id, symbol = %order.symbol, side = %order.side, qty = order.qty, "fill applied");
        Ok(())
    }

    /// Refresh last traded prices for all holdings from the cache.
    pub async fn refresh_prices(&self) {
        let symbols: Vec<String> = {
            let holdings = self.holdings.lock().unwrap();
            holdings.keys().cloned().collect()
        };

        for symbol in symbols {
            let quote = self.cache.quote(&symbol).await;
            let mut holdings = self.holdings.lock().unwrap();
            if let Some(holding) = holdings.get_mut(&symbol) {
                holding.update_price(quote.price);
            }
        }
    }

    /// Derive a fresh portfolio snapshot at current prices.
    pub async fn snapshot(&self) -> PortfolioSnapshot {
        self.refresh_prices().await;

        let holdings = self.holdings();
        let total_value: Decimal = holdings.iter().map(|h| h.value).sum();
        let total_investment: Decimal = holdings.iter().map(|h| h.investment()).sum();
        let overall_pnl = total_value - total_investment;
        let overall_pnl_pct = if total_investment > Decimal::ZERO {
            overall_pnl / total_investment * dec!(100)
        } else {
            Decimal::ZERO
        };

        let today = Utc::now();
        let day_change_pct = day_change_pct(today.day() as usize - 1);
        let month_change_pct = month_change_pct(today.day() as usize);

        PortfolioSnapshot {
            total_value,
            total_investment,
            overall_pnl,
            overall_pnl_pct,
            day_change: total_value * day_change_pct / dec!(100),
            day_change_pct,
            month_change: total_value * month_change_pct / dec!(100),
            month_change_pct,
            allocation: allocation(&holdings, total_value),
            holdings,
        }
    }
}

/// Day change percentage for a zero-based day of month.
fn day_change_pct(day0: usize) -> Decimal {
    DAILY_PNL_PCT[day0 % DAILY_PNL_PCT.len()]
}

/// Month-to-date change percentage after `days` elapsed days.
fn month_change_pct(days: usize) -> Decimal {
    (0..days).map(day_change_pct).sum()
}

/// Bucket holdings into cap-size categories as integer percents of
/// total value. Rounding may drift the sum by one point either way.
fn allocation(holdings: &[Holding], total_value: Decimal) -> Vec<AllocationSlice> {
    let bucket = |symbols: &[&str]| -> Decimal {
        holdings
            .iter()
            .filter(|h| symbols.contains(&h.symbol.as_str()))
            .map(|h| h.value)
            .sum()
    };

    let large = bucket(LARGE_CAP);
    let mid = bucket(MID_CAP);
    let small = total_value - large - mid;

    let percent = |value: Decimal| -> i64 {
        if total_value > Decimal::ZERO {
            (value / total_value * dec!(100)).round().to_i64().unwrap_or(0)
        } else {
            0
        }
    };

    vec![
        AllocationSlice {
            category: "Large Cap".to_string(),
            percent: percent(large),
        },
        AllocationSlice {
            category: "Mid Cap".to_string(),
            percent: percent(mid),
        },
        AllocationSlice {
            category: "Small Cap".to_string(),
            percent: percent(small),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use papertrade_core::types::OrderRequest;
    use papertrade_data::SyntheticFeed;

    fn test_ledger() -> PortfolioLedger {
        let cache = Arc::new(QuoteCache::new(Arc::new(SyntheticFeed::with_seed(1))));
        PortfolioLedger::new(cache)
    }

    fn executed(symbol: &str, side: Side, price: Decimal, qty: u32) -> Order {
        Order::from_request("ORDTEST", &OrderRequest::new(symbol, side, price, qty))
    }

    #[test]
    fn test_buy_creates_holding() {
        let ledger = test_ledger();
        ledger
            .apply_fill(&executed("RELIANCE", Side::Buy, dec!(2450.50), 10))
            .unwrap();

        let holdings = ledger.holdings();
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].qty, 10);
        assert_eq!(holdings[0].avg_price, dec!(2450.50));
    }

    #[test]
    fn test_buy_averages_cost() {
        let ledger = test_ledger();
        ledger
            .apply_fill(&executed("RELIANCE", Side::Buy, dec!(2450.50), 10))
            .unwrap();
        ledger
            .apply_fill(&executed("RELIANCE", Side::Buy, dec!(2500.00), 5))
            .unwrap();

        let holdings = ledger.holdings();
        assert_eq!(holdings[0].qty, 15);
        assert_eq!(holdings[0].avg_price, dec!(2467.00));
    }

    #[test]
    fn test_sell_no_position() {
        let ledger = test_ledger();
        let err = ledger
            .apply_fill(&executed("INFY", Side::Sell, dec!(1640), 5))
            .unwrap_err();
        assert!(matches!(err, OrderError::NoPosition(s) if s == "INFY"));
    }

    #[test]
    fn test_oversell_leaves_ledger_unchanged() {
        let ledger = test_ledger();
        ledger
            .apply_fill(&executed("TCS", Side::Buy, dec!(3920.25), 10))
            .unwrap();

        let err = ledger
            .apply_fill(&executed("TCS", Side::Sell, dec!(3900), 12))
            .unwrap_err();
        assert!(matches!(
            err,
            OrderError::InsufficientQuantity { requested: 12, held: 10, .. }
        ));

        let holdings = ledger.holdings();
        assert_eq!(holdings[0].qty, 10);
        assert_eq!(holdings[0].avg_price, dec!(3920.25));
    }

    #[test]
    fn test_sell_full_quantity_removes_holding() {
        let ledger = test_ledger();
        ledger
            .apply_fill(&executed("TCS", Side::Buy, dec!(3920.25), 10))
            .unwrap();
        ledger
            .apply_fill(&executed("TCS", Side::Sell, dec!(3950), 10))
            .unwrap();

        assert!(ledger.holdings().is_empty());
    }

    #[test]
    fn test_sell_keeps_avg_price() {
        let ledger = test_ledger();
        ledger
            .apply_fill(&executed("HDFCBANK", Side::Buy, dec!(1520.75), 40))
            .unwrap();
        ledger
            .apply_fill(&executed("HDFCBANK", Side::Sell, dec!(1560), 15))
            .unwrap();

        let holdings = ledger.holdings();
        assert_eq!(holdings[0].qty, 25);
        assert_eq!(holdings[0].avg_price, dec!(1520.75));
    }

    #[tokio::test]
    async fn test_snapshot_totals() {
        let ledger = test_ledger();
        ledger
            .apply_fill(&executed("RELIANCE", Side::Buy, dec!(2450.50), 10))
            .unwrap();

        let snapshot = ledger.snapshot().await;
        assert_eq!(snapshot.total_investment, dec!(24505.00));
        assert_eq!(
            snapshot.overall_pnl,
            snapshot.total_value - snapshot.total_investment
        );
        assert_eq!(snapshot.holdings.len(), 1);
    }

    #[test]
    fn test_allocation_sums_to_about_100() {
        let holdings = vec![
            Holding::open("RELIANCE", 25, dec!(2450.50)),
            Holding::open("TATAMOTORS", 40, dec!(850)),
            Holding::open("ZOMATO", 100, dec!(180.25)),
        ];
        let total: Decimal = holdings.iter().map(|h| h.value).sum();
        let slices = allocation(&holdings, total);
        let sum: i64 = slices.iter().map(|s| s.percent).sum();
        assert!((99..=101).contains(&sum), "sum was {}", sum);
    }

    #[test]
    fn test_allocation_empty_portfolio() {
        let slices = allocation(&[], Decimal::ZERO);
        assert!(slices.iter().all(|s| s.percent == 0));
    }

    #[test]
    fn test_month_change_is_running_sum() {
        assert_eq!(month_change_pct(1), day_change_pct(0));
        assert_eq!(
            month_change_pct(3),
            day_change_pct(0) + day_change_pct(1) + day_change_pct(2)
        );
    }
}
