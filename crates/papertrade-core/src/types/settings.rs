//! Trade settings read by order-entry default computation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Process-wide trading preferences.
///
/// Mutable at runtime, never persisted; restarting the process resets
/// these to the configured defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSettings {
    /// Default order quantity for the order ticket
    pub default_qty: u32,
    /// Stoploss offset from entry price, in percent
    pub stoploss_pct: Decimal,
    /// Target offset from entry price, in percent
    pub target_pct: Decimal,
    /// Capital allocated per trade, used to size orders
    pub default_capital_per_trade: Decimal,
}

impl Default for TradeSettings {
    fn default() -> Self {
        Self {
            default_qty: 10,
            stoploss_pct: dec!(2),
            target_pct: dec!(3),
            default_capital_per_trade: dec!(10000),
        }
    }
}

/// Partial update for [`TradeSettings`]; `None` fields are left as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeSettingsPatch {
    pub default_qty: Option<u32>,
    pub stoploss_pct: Option<Decimal>,
    pub target_pct: Option<Decimal>,
    pub default_capital_per_trade: Option<Decimal>,
}

impl TradeSettings {
    /// Apply a partial update.
    pub fn apply(&mut self, patch: TradeSettingsPatch) {
        if let Some(qty) = patch.default_qty {
            self.default_qty = qty;
        }
        if let Some(pct) = patch.stoploss_pct {
            self.stoploss_pct = pct;
        }
        if let Some(pct) = patch.target_pct {
            self.target_pct = pct;
        }
        if let Some(capital) = patch.default_capital_per_trade {
            self.default_capital_per_trade = capital;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_partial() {
        let mut settings = TradeSettings::default();
        settings.apply(TradeSettingsPatch {
            stoploss_pct: Some(dec!(1.5)),
            ..Default::default()
        });
        assert_eq!(settings.stoploss_pct, dec!(1.5));
        assert_eq!(settings.default_qty, 10);
        assert_eq!(settings.target_pct, dec!(3));
    }
}
