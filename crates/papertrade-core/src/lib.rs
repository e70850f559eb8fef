//! Core types and traits for the paper-trading system.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Quote, IndexQuote, HistoricalPoint)
//! - Order and holding types for the simulated broker
//! - Portfolio snapshot and trade settings types
//! - Core traits for quote feeds and clocks

pub mod error;
pub mod traits;
pub mod types;

pub use error::{TradeError, TradeResult};
pub use traits::*;
pub use types::*;
