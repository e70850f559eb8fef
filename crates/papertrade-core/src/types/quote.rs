//! Quote and historical data types.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A point-in-time quote for a single symbol.
///
/// Rebuilt on every fetch; the change fields are derived from
/// `previous_close` at construction and never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Symbol
    pub symbol: String,
    /// Last traded price
    pub price: Decimal,
    /// Opening price of the session
    pub open: Decimal,
    /// Session high
    pub high: Decimal,
    /// Session low
    pub low: Decimal,
    /// Previous session close
    pub previous_close: Decimal,
    /// Traded volume
    pub volume: u64,
    /// Absolute change from previous close
    pub change_abs: Decimal,
    /// Percentage change from previous close
    pub change_pct: Decimal,
}

impl Quote {
    /// Build a quote, deriving the change fields.
    ///
    /// A non-positive `previous_close` makes the percentage change
    /// undefined; it is reported as zero in that case.
    pub fn new(
        symbol: impl Into<String>,
        price: Decimal,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        previous_close: Decimal,
        volume: u64,
    ) -> Self {
        let change_abs = price - previous_close;
        let change_pct = if previous_close > Decimal::ZERO {
            change_abs / previous_close * dec!(100)
        } else {
            Decimal::ZERO
        };

        Self {
            symbol: symbol.into(),
            price,
            open,
            high,
            low,
            previous_close,
            volume,
            change_abs,
            change_pct,
        }
    }

    /// Static safe default served when no fetch ever succeeded and no
    /// cached value exists.
    pub fn fallback(symbol: impl Into<String>) -> Self {
        Self::new(
            symbol,
            dec!(1000),
            dec!(1000),
            dec!(1000),
            dec!(1000),
            dec!(1000),
            100_000,
        )
    }
}

/// A point-in-time value for a market index, keyed by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexQuote {
    /// Index name, e.g. "NIFTY 50"
    pub name: String,
    /// Current index value
    pub value: Decimal,
    /// Absolute change from previous close
    pub change_abs: Decimal,
    /// Percentage change from previous close
    pub change_pct: Decimal,
}

impl IndexQuote {
    /// Build an index quote, deriving the change fields from the
    /// previous close with the same safe-default rule as [`Quote`].
    pub fn new(name: impl Into<String>, value: Decimal, previous_close: Decimal) -> Self {
        let change_abs = value - previous_close;
        let change_pct = if previous_close > Decimal::ZERO {
            change_abs / previous_close * dec!(100)
        } else {
            Decimal::ZERO
        };

        Self {
            name: name.into(),
            value,
            change_abs,
            change_pct,
        }
    }
}

/// One point of a historical price series.
///
/// Series are always delivered oldest first. The OHLCV fields are
/// optional because intraday series from the upstream omit them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    /// Timestamp label, e.g. "10:30" for intraday or "14/3" for daily
    pub label: String,
    /// Price at this point
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_change_derivation() {
        let quote = Quote::new("RELIANCE", dec!(2550), dec!(2530), dec!(2560), dec!(2525), dec!(2500), 500_000);
        assert_eq!(quote.change_abs, dec!(50));
        assert_eq!(quote.change_pct, dec!(2));
    }

    #[test]
    fn test_quote_zero_previous_close() {
        let quote = Quote::new("X", dec!(100), dec!(100), dec!(100), dec!(100), Decimal::ZERO, 0);
        assert_eq!(quote.change_pct, Decimal::ZERO);
        assert_eq!(quote.change_abs, dec!(100));
    }

    #[test]
    fn test_quote_fallback_is_flat() {
        let quote = Quote::fallback("TCS");
        assert!(quote.previous_close > Decimal::ZERO);
        assert_eq!(quote.change_abs, Decimal::ZERO);
        assert_eq!(quote.change_pct, Decimal::ZERO);
    }

    #[test]
    fn test_index_quote_change() {
        let index = IndexQuote::new("NIFTY 50", dec!(22600), dec!(22500));
        assert_eq!(index.change_abs, dec!(100));
        assert!(index.change_pct > dec!(0.44) && index.change_pct < dec!(0.45));
    }
}
