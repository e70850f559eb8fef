//! Error types for the paper-trading system.

use thiserror::Error;

/// Top-level error for the paper-trading system.
#[derive(Error, Debug)]
pub enum TradeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors from the upstream quote source.
///
/// These never escape the market-data layer: the fallback feed converts
/// every variant into a synthetic quote, and the cache serves stale or
/// default values when handed a bare upstream that fails.
#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Upstream returned HTTP {code}")]
    Status { code: u16 },

    #[error("Upstream API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Order and portfolio mutation errors, surfaced directly to the caller.
#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("No holding found for {0}")]
    NoPosition(String),

    #[error("Insufficient quantity to sell {symbol}: requested {requested}, held {held}")]
    InsufficientQuantity {
        symbol: String,
        requested: u32,
        held: u32,
    },

    #[error("Order not found: {0}")]
    NotFound(String),
}

/// Result type alias for trading operations.
pub type TradeResult<T> = Result<T, TradeError>;
