//! Configuration structures.

use papertrade_core::types::TradeSettings;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub trade: TradeSettings,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "papertrade".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Upstream quote API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nse-data-proxy.onrender.com/api".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Quote cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Staleness bound for quotes and indices, in seconds.
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { ttl_secs: 15 }
    }
}

/// Order engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Probability that a pending order executes.
    pub fill_probability: f64,
    /// Simulated exchange round-trip, in milliseconds.
    pub resolution_delay_ms: u64,
    /// Optional RNG seed for reproducible sessions.
    pub seed: Option<u64>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            fill_probability: 0.9,
            resolution_delay_ms: 1500,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Convenience accessor for decimal-typed trade defaults.
    pub fn trade_defaults(&self) -> TradeSettings {
        self.trade.clone()
    }

    /// Sanity-check ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.engine.fill_probability) {
            return Err(format!(
                "engine.fill_probability must be within [0, 1], got {}",
                self.engine.fill_probability
            ));
        }
        if self.trade.stoploss_pct < Decimal::ZERO || self.trade.target_pct < Decimal::ZERO {
            return Err("trade percentages must be non-negative".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.cache.ttl_secs, 15);
        assert_eq!(config.engine.fill_probability, 0.9);
        assert_eq!(config.trade.default_qty, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_probability() {
        let mut config = AppConfig::default();
        config.engine.fill_probability = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let toml_str = r#"
            [app]
            name = "papertrade"
            environment = "test"

            [engine]
            fill_probability = 1.0
            resolution_delay_ms = 0
            seed = 42

            [trade]
            default_qty = 5
            stoploss_pct = "1.5"
            target_pct = "2.5"
            default_capital_per_trade = "50000"
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.engine.seed, Some(42));
        assert_eq!(config.trade.default_qty, 5);
        assert_eq!(config.trade.stoploss_pct, dec!(1.5));
        assert_eq!(config.cache.ttl_secs, 15);
    }
}
