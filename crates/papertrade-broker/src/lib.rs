//! Simulated broker: order engine, portfolio ledger, trade settings.

mod engine;
mod ledger;
mod settings;

pub use engine::{EngineConfig, OrderEngine};
pub use ledger::PortfolioLedger;
pub use settings::{OrderDefaults, SettingsStore};
