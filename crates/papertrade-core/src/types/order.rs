//! Order types for the simulated broker.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Order lifecycle status.
///
/// Every order starts `Pending` and moves exactly once to a terminal
/// state. `Cancelled` is defined for API completeness but is not yet
/// reachable; there is no cancellation path in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// Accepted, resolution scheduled
    Pending,
    /// Filled and applied to the portfolio
    Executed,
    /// Cancelled before execution (reserved)
    Cancelled,
    /// Rejected by the simulated exchange or the ledger
    Rejected,
}

impl OrderStatus {
    /// Check if the order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Executed | OrderStatus::Cancelled | OrderStatus::Rejected
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::Executed => write!(f, "EXECUTED"),
            OrderStatus::Cancelled => write!(f, "CANCELLED"),
            OrderStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// Request for a new order, before the engine assigns identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Symbol to trade
    pub symbol: String,
    /// Buy or sell
    pub side: Side,
    /// Entry price
    pub price: Decimal,
    /// Quantity in whole shares
    pub qty: u32,
    /// Optional stoploss price
    pub stoploss: Option<Decimal>,
    /// Optional target price
    pub target: Option<Decimal>,
}

impl OrderRequest {
    /// Create a plain order request without stoploss/target levels.
    pub fn new(symbol: impl Into<String>, side: Side, price: Decimal, qty: u32) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            price,
            qty,
            stoploss: None,
            target: None,
        }
    }

    /// Attach a stoploss price.
    pub fn with_stoploss(mut self, price: Decimal) -> Self {
        self.stoploss = Some(price);
        self
    }

    /// Attach a target price.
    pub fn with_target(mut self, price: Decimal) -> Self {
        self.target = Some(price);
        self
    }
}

/// An order in the engine's log.
///
/// Immutable after creation except for `status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Engine-assigned id, unique within the process
    pub id: String,
    /// Symbol traded
    pub symbol: String,
    /// Buy or sell
    pub side: Side,
    /// Entry price
    pub price: Decimal,
    /// Quantity in whole shares
    pub qty: u32,
    /// Current lifecycle status
    pub status: OrderStatus,
    /// When the order was created
    pub created_at: DateTime<Utc>,
    /// Optional stoploss price
    pub stoploss: Option<Decimal>,
    /// Optional target price
    pub target: Option<Decimal>,
}

impl Order {
    /// Create a pending order from a validated request.
    pub fn from_request(id: impl Into<String>, request: &OrderRequest) -> Self {
        Self {
            id: id.into(),
            symbol: request.symbol.clone(),
            side: request.side,
            price: request.price,
            qty: request.qty,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            stoploss: request.stoploss,
            target: request.target,
        }
    }

    /// Notional value of the order.
    pub fn value(&self) -> Decimal {
        self.price * Decimal::from(self.qty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_from_request() {
        let request = OrderRequest::new("RELIANCE", Side::Buy, dec!(2450.50), 10);
        let order = Order::from_request("ORD1", &request);

        assert_eq!(order.symbol, "RELIANCE");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.value(), dec!(24505.00));
        assert!(order.stoploss.is_none());
    }

    #[test]
    fn test_order_request_levels() {
        let request = OrderRequest::new("TCS", Side::Sell, dec!(3850), 5)
            .with_stoploss(dec!(3927))
            .with_target(dec!(3734.50));
        assert_eq!(request.stoploss, Some(dec!(3927)));
        assert_eq!(request.target, Some(dec!(3734.50)));
    }

    #[test]
    fn test_status_terminal() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(OrderStatus::Executed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Rejected.is_terminal());
    }
}
