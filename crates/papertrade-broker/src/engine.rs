//! Order engine: identity, lifecycle, and delayed resolution.

use chrono::Utc;
use papertrade_core::error::OrderError;
use papertrade_core::types::{Order, OrderRequest, OrderStatus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{info, warn};

use crate::ledger::PortfolioLedger;

/// Tunables for the simulated exchange round-trip.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Probability that a pending order executes rather than rejects.
    /// A design parameter of the simulation, not a contract.
    pub fill_probability: f64,
    /// Delay before a pending order resolves.
    pub resolution_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fill_probability: 0.9,
            resolution_delay: Duration::from_millis(1500),
        }
    }
}

/// Accepts orders, assigns identity, and resolves them asynchronously.
///
/// Placement appends a `Pending` order to the log and schedules a
/// resolution task; after the configured delay the order moves exactly
/// once to `Executed` (applying the fill to the ledger) or `Rejected`.
/// There is no cancellation path; a scheduled resolution always runs.
pub struct OrderEngine {
    ledger: Arc<PortfolioLedger>,
    orders: Arc<Mutex<Vec<Order>>>,
    rng: Arc<Mutex<StdRng>>,
    config: EngineConfig,
    seq: AtomicU64,
}

impl OrderEngine {
    /// Create an engine with an entropy-seeded outcome source.
    pub fn new(ledger: Arc<PortfolioLedger>, config: EngineConfig) -> Self {
        Self::with_rng(ledger, config, StdRng::from_entropy())
    }

    /// Create an engine with a fixed seed for reproducible outcomes.
    pub fn with_seed(ledger: Arc<PortfolioLedger>, config: EngineConfig, seed: u64) -> Self {
        Self::with_rng(ledger, config, StdRng::seed_from_u64(seed))
    }

    /// Create an engine with an explicit RNG for reproducible outcomes.
    pub fn with_rng(ledger: Arc<PortfolioLedger>, config: EngineConfig, rng: StdRng) -> Self {
        Self {
            ledger,
            orders: Arc::new(Mutex::new(Vec::new())),
            rng: Arc::new(Mutex::new(rng)),
            config,
            seq: AtomicU64::new(0),
        }
    }

    fn next_id(&self) -> String {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        format!("ORD{}-{}", Utc::now().timestamp_millis(), seq)
    }

    /// Validate and accept a new order.
    ///
    /// Rejected requests (`qty == 0`, non-positive price) leave the
    /// order log untouched. The returned order is `Pending`;
    /// resolution happens after the configured delay.
    pub fn place_order(&self, request: OrderRequest) -> Result<Order, OrderError> {
        if request.qty == 0 {
            return Err(OrderError::InvalidOrder("quantity must be positive".into()));
        }
        if request.price <= Decimal::ZERO {
            return Err(OrderError::InvalidOrder("price must be positive".into()));
        }

        let order = Order::from_request(self.next_id(), &request);
        self.orders.lock().unwrap().push(order.clone());
        info!(order_id = %order.id, symbol = %order.symbol, side = %order.side, qty = order.qty, "order placed");

        self.schedule_resolution(order.id.clone());
        Ok(order)
    }

    fn schedule_resolution(&self, order_id: String) {
        let orders = Arc::clone(&self.orders);
        let ledger = Arc::clone(&self.ledger);
        let rng = Arc::clone(&self.rng);
        let delay = self.config.resolution_delay;
        let fill_probability = self.config.fill_probability;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            resolve(&orders, &ledger, &rng, fill_probability, &order_id);
        });
    }

    /// All orders, newest first, including pending ones.
    pub fn recent_orders(&self) -> Vec<Order> {
        let orders = self.orders.lock().unwrap();
        let mut list = orders.clone();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    }

    /// Look up a single order by id.
    pub fn order(&self, order_id: &str) -> Result<Order, OrderError> {
        let orders = self.orders.lock().unwrap();
        orders
            .iter()
            .find(|o| o.id == order_id)
            .cloned()
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))
    }
}

/// Resolve a pending order: draw the outcome, apply the fill on
/// success, and set the terminal status exactly once.
fn resolve(
    orders: &Mutex<Vec<Order>>,
    ledger: &PortfolioLedger,
    rng: &Mutex<StdRng>,
    fill_probability: f64,
    order_id: &str,
) {
    let pending = {
        let orders = orders.lock().unwrap();
        match orders.iter().find(|o| o.id == order_id) {
            Some(order) if order.status == OrderStatus::Pending => order.clone(),
            _ => return,
        }
    };

    let draw: f64 = rng.lock().unwrap().gen();
    let status = if draw < fill_probability {
        match ledger.apply_fill(&pending) {
            Ok(()) => OrderStatus::Executed,
            Err(err) => {
                warn!(order_id, error = %err, "fill rejected by ledger");
                OrderStatus::Rejected
            }
        }
    } else {
        info!(order_id, "order rejected by simulated exchange");
        OrderStatus::Rejected
    };

    let mut orders = orders.lock().unwrap();
    if let Some(order) = orders.iter_mut().find(|o| o.id == order_id) {
        if order.status == OrderStatus::Pending {
            order.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use papertrade_core::types::Side;
    use papertrade_data::{QuoteCache, SyntheticFeed};
    use rust_decimal_macros::dec;

    fn engine_with(fill_probability: f64) -> OrderEngine {
        let cache = Arc::new(QuoteCache::new(Arc::new(SyntheticFeed::with_seed(1))));
        let ledger = Arc::new(PortfolioLedger::new(cache));
        OrderEngine::with_rng(
            ledger,
            EngineConfig {
                fill_probability,
                resolution_delay: Duration::from_millis(10),
            },
            StdRng::seed_from_u64(42),
        )
    }

    async fn wait_terminal(engine: &OrderEngine, order_id: &str) -> Order {
        for _ in 0..200 {
            let order = engine.order(order_id).unwrap();
            if order.status.is_terminal() {
                return order;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("order {} never resolved", order_id);
    }

    #[tokio::test]
    async fn test_zero_qty_rejected_before_logging() {
        let engine = engine_with(1.0);
        let err = engine
            .place_order(OrderRequest::new("RELIANCE", Side::Buy, dec!(2450.50), 0))
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidOrder(_)));
        assert!(engine.recent_orders().is_empty());
    }

    #[tokio::test]
    async fn test_non_positive_price_rejected() {
        let engine = engine_with(1.0);
        let err = engine
            .place_order(OrderRequest::new("RELIANCE", Side::Buy, Decimal::ZERO, 10))
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidOrder(_)));
        assert!(engine.recent_orders().is_empty());
    }

    #[tokio::test]
    async fn test_forced_execution_fills_ledger() {
        let engine = engine_with(1.0);
        let order = engine
            .place_order(OrderRequest::new("RELIANCE", Side::Buy, dec!(2450.50), 10))
            .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);

        let resolved = wait_terminal(&engine, &order.id).await;
        assert_eq!(resolved.status, OrderStatus::Executed);

        let holdings = engine.ledger.holdings();
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].qty, 10);
    }

    #[tokio::test]
    async fn test_forced_rejection_leaves_ledger_empty() {
        let engine = engine_with(0.0);
        let order = engine
            .place_order(OrderRequest::new("TCS", Side::Buy, dec!(3850), 5))
            .unwrap();

        let resolved = wait_terminal(&engine, &order.id).await;
        assert_eq!(resolved.status, OrderStatus::Rejected);
        assert!(engine.ledger.holdings().is_empty());
    }

    #[tokio::test]
    async fn test_recent_orders_newest_first() {
        let engine = engine_with(1.0);
        let first = engine
            .place_order(OrderRequest::new("INFY", Side::Buy, dec!(1640), 1))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;
        let second = engine
            .place_order(OrderRequest::new("TCS", Side::Buy, dec!(3850), 1))
            .unwrap();

        let recent = engine.recent_orders();
        assert_eq!(recent[0].id, second.id);
        assert_eq!(recent[1].id, first.id);
    }

    #[tokio::test]
    async fn test_order_ids_unique() {
        let engine = engine_with(1.0);
        let a = engine
            .place_order(OrderRequest::new("INFY", Side::Buy, dec!(1640), 1))
            .unwrap();
        let b = engine
            .place_order(OrderRequest::new("INFY", Side::Buy, dec!(1640), 1))
            .unwrap();
        assert_ne!(a.id, b.id);
    }
}
