//! Runtime trade settings and order-ticket defaults.

use papertrade_core::types::{Quote, Side, TradeSettings, TradeSettingsPatch};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Mutex;
use tracing::info;

/// Prefilled values for the order ticket, derived from settings and
/// the current quote.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDefaults {
    pub qty: u32,
    pub stoploss: Decimal,
    pub target: Decimal,
}

/// Mutable process-wide trade settings.
///
/// Lives for the process lifetime only; restarts reset to defaults.
pub struct SettingsStore {
    settings: Mutex<TradeSettings>,
}

impl SettingsStore {
    pub fn new(settings: TradeSettings) -> Self {
        Self {
            settings: Mutex::new(settings),
        }
    }

    /// Current settings snapshot.
    pub fn get(&self) -> TradeSettings {
        self.settings.lock().unwrap().clone()
    }

    /// Apply a partial update and return the result.
    pub fn update(&self, patch: TradeSettingsPatch) -> TradeSettings {
        let mut settings = self.settings.lock().unwrap();
        settings.apply(patch);
        info!(?settings, "trade settings updated");
        settings.clone()
    }

    /// Compute order-ticket defaults for a quote.
    ///
    /// Quantity is sized from the per-trade capital allocation, falling
    /// back to the configured default quantity when the price exceeds
    /// the allocation. Stoploss and target offset the entry price by
    /// the configured percentages, flipped for sells.
    pub fn order_defaults(&self, quote: &Quote, side: Side) -> OrderDefaults {
        let settings = self.get();
        let price = quote.price;

        let qty = if price > Decimal::ZERO {
            (settings.default_capital_per_trade / price)
                .floor()
                .to_u32()
                .filter(|q| *q > 0)
                .unwrap_or(settings.default_qty)
        } else {
            settings.default_qty
        };

        let sl_offset = price * settings.stoploss_pct / dec!(100);
        let tgt_offset = price * settings.target_pct / dec!(100);

        let (stoploss, target) = match side {
            Side::Buy => (price - sl_offset, price + tgt_offset),
            Side::Sell => (price + sl_offset, price - tgt_offset),
        };

        OrderDefaults {
            qty,
            stoploss: stoploss.round_dp(2),
            target: target.round_dp(2),
        }
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(TradeSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(price: Decimal) -> Quote {
        Quote::new("RELIANCE", price, price, price, price, price, 100_000)
    }

    #[test]
    fn test_update_partial() {
        let store = SettingsStore::default();
        let updated = store.update(TradeSettingsPatch {
            default_qty: Some(25),
            ..Default::default()
        });
        assert_eq!(updated.default_qty, 25);
        assert_eq!(store.get().default_qty, 25);
        assert_eq!(store.get().stoploss_pct, dec!(2));
    }

    #[test]
    fn test_buy_defaults() {
        let store = SettingsStore::default();
        let defaults = store.order_defaults(&quote(dec!(2500)), Side::Buy);

        // 10000 capital / 2500 = 4 shares
        assert_eq!(defaults.qty, 4);
        assert_eq!(defaults.stoploss, dec!(2450.00));
        assert_eq!(defaults.target, dec!(2575.00));
    }

    #[test]
    fn test_sell_defaults_flip() {
        let store = SettingsStore::default();
        let defaults = store.order_defaults(&quote(dec!(1000)), Side::Sell);
        assert_eq!(defaults.stoploss, dec!(1020.00));
        assert_eq!(defaults.target, dec!(970.00));
    }

    #[test]
    fn test_price_above_capital_falls_back_to_default_qty() {
        let store = SettingsStore::default();
        let defaults = store.order_defaults(&quote(dec!(25000)), Side::Buy);
        assert_eq!(defaults.qty, 10);
    }
}
