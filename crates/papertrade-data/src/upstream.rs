//! Upstream quote API client.

use async_trait::async_trait;
use papertrade_core::error::MarketDataError;
use papertrade_core::traits::QuoteFeed;
use papertrade_core::types::{HistoricalPoint, IndexQuote, Quote, Timeframe};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// HTTP client for the upstream quote API.
///
/// Every failure mode (transport error, non-success status, error-shaped
/// payload, unparseable body) maps to a [`MarketDataError`]; recovery is
/// the caller's job.
pub struct UpstreamApi {
    client: Client,
    base_url: String,
}

/// Either an error envelope or the expected body.
///
/// The error variant must come first so serde tries it before the
/// data shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiPayload<T> {
    Error(ApiErrorBody),
    Ok(T),
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    status: String,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RawQuote {
    symbol: String,
    close: Decimal,
    previous_close: Decimal,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    volume: u64,
}

#[derive(Debug, Deserialize)]
struct RawIndex {
    name: String,
    value: Decimal,
    previous_close: Decimal,
}

#[derive(Debug, Deserialize)]
struct RawHistory {
    values: Vec<RawPoint>,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    datetime: String,
    open: Option<Decimal>,
    high: Option<Decimal>,
    low: Option<Decimal>,
    close: Decimal,
    volume: Option<u64>,
}

impl UpstreamApi {
    /// Create a client for the given base URL.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MarketDataError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MarketDataError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, MarketDataError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        debug!(url = %url, "upstream request");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| MarketDataError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::Status {
                code: status.as_u16(),
            });
        }

        let payload: ApiPayload<T> = response
            .json()
            .await
            .map_err(|e| MarketDataError::Parse(e.to_string()))?;

        match payload {
            ApiPayload::Ok(value) => Ok(value),
            ApiPayload::Error(body) if body.status == "error" => {
                Err(MarketDataError::Api(body.message))
            }
            ApiPayload::Error(body) => Err(MarketDataError::Parse(format!(
                "unexpected payload status {:?}",
                body.status
            ))),
        }
    }
}

/// The upstream serves some intervals newest-first; reorder to
/// ascending time when the endpoints indicate a descending series.
fn normalize_ascending(mut values: Vec<RawPoint>) -> Vec<RawPoint> {
    let descending = match (values.first(), values.last()) {
        (Some(first), Some(last)) => first.datetime > last.datetime,
        _ => false,
    };
    if descending {
        values.reverse();
    }
    values
}

#[async_trait]
impl QuoteFeed for UpstreamApi {
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let raw: RawQuote = self.get_json("quote", &[("symbol", symbol)]).await?;

        Ok(Quote::new(
            raw.symbol,
            raw.close,
            raw.open,
            raw.high,
            raw.low,
            raw.previous_close,
            raw.volume,
        ))
    }

    async fn fetch_indices(&self) -> Result<Vec<IndexQuote>, MarketDataError> {
        let raw: Vec<RawIndex> = self.get_json("indices", &[]).await?;

        Ok(raw
            .into_iter()
            .map(|i| IndexQuote::new(i.name, i.value, i.previous_close))
            .collect())
    }

    async fn fetch_history(
        &self,
        symbol: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<HistoricalPoint>, MarketDataError> {
        let outputsize = timeframe.point_count().to_string();
        let raw: RawHistory = self
            .get_json(
                "history",
                &[
                    ("symbol", symbol),
                    ("interval", timeframe.interval()),
                    ("outputsize", &outputsize),
                ],
            )
            .await?;

        Ok(normalize_ascending(raw.values)
            .into_iter()
            .map(|p| HistoricalPoint {
                label: p.datetime,
                price: p.close,
                open: p.open,
                high: p.high,
                low: p.low,
                close: Some(p.close),
                volume: p.volume,
            })
            .collect())
    }

    fn name(&self) -> &str {
        "upstream"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn point(datetime: &str) -> RawPoint {
        RawPoint {
            datetime: datetime.to_string(),
            open: None,
            high: None,
            low: None,
            close: dec!(1000),
            volume: None,
        }
    }

    fn datetimes(values: &[RawPoint]) -> Vec<&str> {
        values.iter().map(|p| p.datetime.as_str()).collect()
    }

    #[test]
    fn test_descending_series_reversed() {
        let values = vec![point("2026-08-28"), point("2026-08-27"), point("2026-08-26")];
        let normalized = normalize_ascending(values);
        assert_eq!(
            datetimes(&normalized),
            vec!["2026-08-26", "2026-08-27", "2026-08-28"]
        );
    }

    #[test]
    fn test_ascending_series_untouched() {
        let values = vec![point("2026-08-26"), point("2026-08-27"), point("2026-08-28")];
        let normalized = normalize_ascending(values);
        assert_eq!(
            datetimes(&normalized),
            vec!["2026-08-26", "2026-08-27", "2026-08-28"]
        );
    }

    #[test]
    fn test_empty_and_single_series() {
        assert!(normalize_ascending(Vec::new()).is_empty());
        let normalized = normalize_ascending(vec![point("2026-08-28")]);
        assert_eq!(datetimes(&normalized), vec!["2026-08-28"]);
    }

    #[test]
    fn test_error_payload_parses_first() {
        let body = r#"{"status":"error","message":"symbol not found"}"#;
        let payload: ApiPayload<RawQuote> = serde_json::from_str(body).unwrap();
        assert!(matches!(payload, ApiPayload::Error(e) if e.message == "symbol not found"));
    }

    #[test]
    fn test_quote_payload_parses() {
        let body = r#"{
            "symbol": "RELIANCE",
            "close": 2543.60,
            "previous_close": 2500.00,
            "open": 2510.00,
            "high": 2550.00,
            "low": 2495.00,
            "volume": 734500
        }"#;
        let payload: ApiPayload<RawQuote> = serde_json::from_str(body).unwrap();
        match payload {
            ApiPayload::Ok(q) => {
                assert_eq!(q.symbol, "RELIANCE");
                assert_eq!(q.volume, 734_500);
            }
            ApiPayload::Error(_) => panic!("parsed as error"),
        }
    }

    #[test]
    fn test_history_points_optional_fields() {
        let body = r#"{"values":[{"datetime":"2026-08-28","close":2500.0}]}"#;
        let payload: ApiPayload<RawHistory> = serde_json::from_str(body).unwrap();
        match payload {
            ApiPayload::Ok(h) => {
                assert_eq!(h.values.len(), 1);
                assert!(h.values[0].open.is_none());
            }
            ApiPayload::Error(_) => panic!("parsed as error"),
        }
    }
}
