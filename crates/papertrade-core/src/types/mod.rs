//! Core data types for the paper-trading system.

mod holding;
mod order;
mod quote;
mod settings;
mod timeframe;

pub use holding::{AllocationSlice, Holding, PortfolioSnapshot};
pub use order::{Order, OrderRequest, OrderStatus, Side};
pub use quote::{HistoricalPoint, IndexQuote, Quote};
pub use settings::{TradeSettings, TradeSettingsPatch};
pub use timeframe::Timeframe;
