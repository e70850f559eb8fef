//! Timeframe definitions for historical data requests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Timeframe for historical price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    /// One trading day, hourly points
    #[serde(rename = "1D")]
    #[default]
    Day1,
    /// One week of daily points
    #[serde(rename = "1W")]
    Week1,
    /// One month of daily points
    #[serde(rename = "1M")]
    Month1,
    /// Three months of daily points
    #[serde(rename = "3M")]
    Month3,
    /// Six months of daily points
    #[serde(rename = "6M")]
    Month6,
    /// One year of daily points
    #[serde(rename = "1Y")]
    Year1,
}

impl Timeframe {
    /// Number of points a series for this timeframe contains.
    pub fn point_count(&self) -> usize {
        match self {
            Timeframe::Day1 => 24,
            Timeframe::Week1 => 7,
            Timeframe::Month1 => 30,
            Timeframe::Month3 => 90,
            Timeframe::Month6 => 180,
            Timeframe::Year1 => 365,
        }
    }

    /// Whether points are spaced within a single session.
    pub fn is_intraday(&self) -> bool {
        matches!(self, Timeframe::Day1)
    }

    /// Upstream interval string for the history endpoint.
    pub fn interval(&self) -> &'static str {
        match self {
            Timeframe::Day1 => "1h",
            _ => "1day",
        }
    }

    /// Get all available timeframes.
    pub fn all() -> &'static [Timeframe] {
        &[
            Timeframe::Day1,
            Timeframe::Week1,
            Timeframe::Month1,
            Timeframe::Month3,
            Timeframe::Month6,
            Timeframe::Year1,
        ]
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Timeframe::Day1 => "1D",
            Timeframe::Week1 => "1W",
            Timeframe::Month1 => "1M",
            Timeframe::Month3 => "3M",
            Timeframe::Month6 => "6M",
            Timeframe::Year1 => "1Y",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "1D" => Ok(Timeframe::Day1),
            "1W" => Ok(Timeframe::Week1),
            "1M" => Ok(Timeframe::Month1),
            "3M" => Ok(Timeframe::Month3),
            "6M" => Ok(Timeframe::Month6),
            "1Y" => Ok(Timeframe::Year1),
            _ => Err(format!("Invalid timeframe: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_counts() {
        assert_eq!(Timeframe::Day1.point_count(), 24);
        assert_eq!(Timeframe::Week1.point_count(), 7);
        assert_eq!(Timeframe::Month1.point_count(), 30);
        assert_eq!(Timeframe::Month3.point_count(), 90);
        assert_eq!(Timeframe::Month6.point_count(), 180);
        assert_eq!(Timeframe::Year1.point_count(), 365);
    }

    #[test]
    fn test_parse_roundtrip() {
        for tf in Timeframe::all() {
            assert_eq!(Timeframe::from_str(&tf.to_string()).unwrap(), *tf);
        }
        assert!(Timeframe::from_str("2H").is_err());
    }

    #[test]
    fn test_is_intraday() {
        assert!(Timeframe::Day1.is_intraday());
        assert!(!Timeframe::Year1.is_intraday());
    }
}
