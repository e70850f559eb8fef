//! Holding and portfolio snapshot types.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A long position in a single symbol.
///
/// Quantity is always positive; a holding that would reach zero is
/// removed from the ledger instead of being retained flat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Symbol
    pub symbol: String,
    /// Shares held
    pub qty: u32,
    /// Weighted-average cost per share, across all buys
    pub avg_price: Decimal,
    /// Last traded price
    pub ltp: Decimal,
    /// Market value (ltp * qty)
    pub value: Decimal,
    /// Unrealized profit/loss against cost basis
    pub pnl: Decimal,
    /// Unrealized P&L as a percentage of cost basis
    pub pnl_pct: Decimal,
}

impl Holding {
    /// Open a new holding from a first buy.
    pub fn open(symbol: impl Into<String>, qty: u32, price: Decimal) -> Self {
        let mut holding = Self {
            symbol: symbol.into(),
            qty,
            avg_price: price,
            ltp: price,
            value: Decimal::ZERO,
            pnl: Decimal::ZERO,
            pnl_pct: Decimal::ZERO,
        };
        holding.recompute();
        holding
    }

    /// Cost basis of the holding (avg_price * qty).
    pub fn investment(&self) -> Decimal {
        self.avg_price * Decimal::from(self.qty)
    }

    /// Add shares at a price, folding it into the weighted average.
    ///
    /// Saturates at `u32::MAX` like [`reduce`](Self::reduce) saturates
    /// at zero; the shares beyond the cap are dropped from the average.
    pub fn add(&mut self, qty: u32, price: Decimal) {
        let new_qty = self.qty.saturating_add(qty);
        let added = new_qty - self.qty;
        let total_cost = self.investment() + price * Decimal::from(added);
        self.avg_price = total_cost / Decimal::from(new_qty);
        self.qty = new_qty;
        self.recompute();
    }

    /// Remove shares. The average price is untouched by sells.
    ///
    /// Callers must check quantity beforehand; this saturates at zero
    /// rather than going short.
    pub fn reduce(&mut self, qty: u32) {
        self.qty = self.qty.saturating_sub(qty);
        self.recompute();
    }

    /// Update the last traded price and derived values.
    pub fn update_price(&mut self, ltp: Decimal) {
        self.ltp = ltp;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.value = self.ltp * Decimal::from(self.qty);
        let investment = self.investment();
        self.pnl = self.value - investment;
        self.pnl_pct = if investment > Decimal::ZERO {
            self.pnl / investment * dec!(100)
        } else {
            Decimal::ZERO
        };
    }
}

/// One slice of the allocation breakdown, as an integer percent of
/// total portfolio value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationSlice {
    /// Category label, e.g. "Large Cap"
    pub category: String,
    /// Percent of total value, rounded to the nearest integer
    pub percent: i64,
}

/// Derived portfolio summary, recomputed fresh on each request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// Current market value of all holdings
    pub total_value: Decimal,
    /// Total cost basis
    pub total_investment: Decimal,
    /// total_value - total_investment
    pub overall_pnl: Decimal,
    /// Overall P&L as a percentage of investment
    pub overall_pnl_pct: Decimal,
    /// Value change attributed to the current day
    pub day_change: Decimal,
    /// Day change percentage
    pub day_change_pct: Decimal,
    /// Month-to-date value change
    pub month_change: Decimal,
    /// Month-to-date change percentage
    pub month_change_pct: Decimal,
    /// Allocation breakdown by cap-size category
    pub allocation: Vec<AllocationSlice>,
    /// Holdings at the time of the snapshot
    pub holdings: Vec<Holding>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_holding() {
        let holding = Holding::open("RELIANCE", 10, dec!(2450.50));
        assert_eq!(holding.qty, 10);
        assert_eq!(holding.avg_price, dec!(2450.50));
        assert_eq!(holding.value, dec!(24505.00));
        assert_eq!(holding.pnl, Decimal::ZERO);
    }

    #[test]
    fn test_add_weighted_average() {
        let mut holding = Holding::open("RELIANCE", 10, dec!(2450.50));
        holding.add(5, dec!(2500.00));
        assert_eq!(holding.qty, 15);
        assert_eq!(holding.avg_price, dec!(2467.00));
    }

    #[test]
    fn test_reduce_keeps_avg_price() {
        let mut holding = Holding::open("TCS", 10, dec!(3920.25));
        holding.update_price(dec!(4000));
        holding.reduce(4);
        assert_eq!(holding.qty, 6);
        assert_eq!(holding.avg_price, dec!(3920.25));
        assert_eq!(holding.value, dec!(24000));
    }

    #[test]
    fn test_add_saturates_at_max_qty() {
        let mut holding = Holding::open("RELIANCE", u32::MAX - 5, dec!(100));
        holding.add(10, dec!(100));
        assert_eq!(holding.qty, u32::MAX);
        assert_eq!(holding.avg_price, dec!(100));
    }

    #[test]
    fn test_pnl_after_price_update() {
        let mut holding = Holding::open("INFY", 10, dec!(1600));
        holding.update_price(dec!(1640));
        assert_eq!(holding.pnl, dec!(400));
        assert_eq!(holding.pnl_pct, dec!(2.5));
    }
}
