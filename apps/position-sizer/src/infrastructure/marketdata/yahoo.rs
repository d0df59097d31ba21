//! Yahoo Finance Chart Adapter
//!
//! REST implementation of `MarketDataPort` over the public chart endpoint:
//!
//! ```text
//! GET {base_url}/v8/finance/chart/{symbol}?range=1d&interval=1m   (intraday)
//! GET {base_url}/v8/finance/chart/{symbol}?range=1d&interval=1d   (daily)
//! ```

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::{Client, StatusCode, Url};
use rust_decimal::Decimal;

use super::api_types::{ChartResponse, ChartResult};
use crate::application::ports::{MarketDataError, MarketDataPort, PriceBar, SeriesGranularity};
use crate::config::MarketDataConfig;

/// Chart error code for unknown symbols.
const NOT_FOUND_CODE: &str = "Not Found";

/// Errors raised while building the adapter.
#[derive(Debug, thiserror::Error)]
pub enum YahooAdapterError {
    /// Base URL does not parse or cannot carry path segments.
    #[error("invalid market data base URL '{0}'")]
    InvalidBaseUrl(String),
    /// HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Yahoo Finance chart adapter.
#[derive(Debug, Clone)]
pub struct YahooChartAdapter {
    client: Client,
    base_url: Url,
}

impl YahooChartAdapter {
    /// Create a new adapter.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the client cannot be built.
    pub fn new(config: &MarketDataConfig) -> Result<Self, YahooAdapterError> {
        let base_url = Url::parse(config.base_url.trim())
            .map_err(|_| YahooAdapterError::InvalidBaseUrl(config.base_url.clone()))?;
        if base_url.cannot_be_a_base() {
            return Err(YahooAdapterError::InvalidBaseUrl(config.base_url.clone()));
        }

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| YahooAdapterError::Client(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Build the chart URL for a symbol.
    fn chart_url(&self, symbol: &str, granularity: SeriesGranularity) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v8", "finance", "chart", symbol]);
        }
        url.query_pairs_mut()
            .append_pair("range", "1d")
            .append_pair("interval", interval(granularity));
        url
    }
}

const fn interval(granularity: SeriesGranularity) -> &'static str {
    match granularity {
        SeriesGranularity::Intraday => "1m",
        SeriesGranularity::Daily => "1d",
    }
}

#[async_trait]
impl MarketDataPort for YahooChartAdapter {
    async fn price_series(
        &self,
        symbol: &str,
        granularity: SeriesGranularity,
    ) -> Result<Vec<PriceBar>, MarketDataError> {
        let url = self.chart_url(symbol, granularity);

        tracing::debug!(symbol, granularity = granularity.as_str(), "Fetching chart");

        let response = self.client.get(url).send().await.map_err(|e| {
            MarketDataError::ConnectionError {
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(MarketDataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| MarketDataError::ConnectionError {
                message: e.to_string(),
            })?;

        if !status.is_success() {
            return Err(MarketDataError::ApiError {
                message: format!("HTTP {}: {}", status.as_u16(), truncate(&body, 200)),
            });
        }

        let parsed: ChartResponse =
            serde_json::from_str(&body).map_err(|e| MarketDataError::ParseError {
                message: e.to_string(),
            })?;

        if let Some(error) = parsed.chart.error {
            if error.code == NOT_FOUND_CODE {
                return Err(MarketDataError::SymbolNotFound {
                    symbol: symbol.to_string(),
                });
            }
            return Err(MarketDataError::ApiError {
                message: format!("{}: {}", error.code, error.description),
            });
        }

        let bars = parsed
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .map(|result| to_price_bars(&result))
            .transpose()?
            .unwrap_or_default();

        tracing::debug!(
            symbol,
            granularity = granularity.as_str(),
            bars = bars.len(),
            "Chart fetched"
        );

        Ok(bars)
    }
}

/// Convert a chart series into bars, skipping entries with a null open or close.
fn to_price_bars(result: &ChartResult) -> Result<Vec<PriceBar>, MarketDataError> {
    let Some(timestamps) = result.timestamp.as_deref() else {
        return Ok(Vec::new());
    };
    let Some(quote) = result.indicators.quote.first() else {
        return Ok(Vec::new());
    };

    let offset =
        FixedOffset::east_opt(result.meta.gmtoffset).ok_or_else(|| MarketDataError::ParseError {
            message: format!("invalid gmtoffset {}", result.meta.gmtoffset),
        })?;

    tracing::trace!(
        symbol = %result.meta.symbol,
        currency = ?result.meta.currency,
        exchange = ?result.meta.exchange_name,
        points = timestamps.len(),
        "Chart series"
    );

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let open = quote.open.get(i).copied().flatten();
        let close = quote.close.get(i).copied().flatten();
        let (Some(open), Some(close)) = (open, close) else {
            continue;
        };

        let timestamp = DateTime::from_timestamp(ts, 0)
            .ok_or_else(|| MarketDataError::ParseError {
                message: format!("invalid timestamp {ts}"),
            })?
            .with_timezone(&offset);

        bars.push(PriceBar {
            timestamp,
            open: to_decimal(open)?,
            close: to_decimal(close)?,
        });
    }

    Ok(bars)
}

fn to_decimal(value: f64) -> Result<Decimal, MarketDataError> {
    Decimal::try_from(value).map_err(|e| MarketDataError::ParseError {
        message: format!("price {value} is not representable: {e}"),
    })
}

fn truncate(body: &str, max: usize) -> &str {
    body.char_indices()
        .nth(max)
        .map_or(body, |(idx, _)| &body[..idx])
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn adapter(server: &MockServer) -> YahooChartAdapter {
        let config = MarketDataConfig {
            base_url: server.uri(),
            user_agent: "test-agent".to_string(),
            request_timeout_secs: Some(5),
        };
        YahooChartAdapter::new(&config).unwrap()
    }

    fn chart_body(timestamps: &[i64], open: &[Option<f64>], close: &[Option<f64>]) -> serde_json::Value {
        json!({
            "chart": {
                "result": [{
                    "meta": {
                        "symbol": "EURUSD=X",
                        "currency": "USD",
                        "exchangeName": "CCY",
                        "gmtoffset": 3600
                    },
                    "timestamp": timestamps,
                    "indicators": { "quote": [{ "open": open, "close": close }] }
                }],
                "error": null
            }
        })
    }

    #[test]
    fn chart_url_layout() {
        let config = MarketDataConfig {
            base_url: "https://example.com/".to_string(),
            ..MarketDataConfig::default()
        };
        let adapter = YahooChartAdapter::new(&config).unwrap();

        let url = adapter.chart_url("EURUSD=X", SeriesGranularity::Intraday);

        assert_eq!(
            url.as_str(),
            "https://example.com/v8/finance/chart/EURUSD=X?range=1d&interval=1m"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let config = MarketDataConfig {
            base_url: "mailto:someone@example.com".to_string(),
            ..MarketDataConfig::default()
        };

        assert!(matches!(
            YahooChartAdapter::new(&config),
            Err(YahooAdapterError::InvalidBaseUrl(_))
        ));
    }

    #[tokio::test]
    async fn parses_bars_and_skips_nulls() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/EURUSD=X"))
            .and(query_param("interval", "1m"))
            .and(query_param("range", "1d"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(
                &[1_772_462_520, 1_772_462_580, 1_772_462_640],
                &[Some(1.08), None, Some(1.085)],
                &[Some(1.081), Some(1.082), Some(1.0875)],
            )))
            .expect(1)
            .mount(&server)
            .await;

        let bars = adapter(&server)
            .price_series("EURUSD=X", SeriesGranularity::Intraday)
            .await
            .unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].open, dec!(1.085));
        assert_eq!(bars[1].close, dec!(1.0875));
        assert_eq!(bars[1].timestamp.offset().local_minus_utc(), 3600);
        assert_eq!(bars[1].timestamp.timestamp(), 1_772_462_640);
    }

    #[tokio::test]
    async fn daily_uses_daily_interval() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/GBPUSD=X"))
            .and(query_param("interval", "1d"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(
                &[1_772_409_600],
                &[Some(1.27)],
                &[Some(1.2712)],
            )))
            .expect(1)
            .mount(&server)
            .await;

        let bars = adapter(&server)
            .price_series("GBPUSD=X", SeriesGranularity::Daily)
            .await
            .unwrap();

        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, dec!(1.2712));
    }

    #[tokio::test]
    async fn missing_timestamps_mean_empty_series() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "chart": {
                    "result": [{
                        "meta": { "symbol": "EURUSD=X", "gmtoffset": 0 },
                        "indicators": { "quote": [{}] }
                    }],
                    "error": null
                }
            })))
            .mount(&server)
            .await;

        let bars = adapter(&server)
            .price_series("EURUSD=X", SeriesGranularity::Intraday)
            .await
            .unwrap();

        assert!(bars.is_empty());
    }

    #[tokio::test]
    async fn http_404_is_symbol_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "chart": {
                    "result": null,
                    "error": { "code": "Not Found", "description": "No data found" }
                }
            })))
            .mount(&server)
            .await;

        let result = adapter(&server)
            .price_series("NOPE", SeriesGranularity::Daily)
            .await;

        assert_eq!(
            result,
            Err(MarketDataError::SymbolNotFound {
                symbol: "NOPE".to_string()
            })
        );
    }

    #[tokio::test]
    async fn chart_error_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "chart": {
                    "result": null,
                    "error": { "code": "Bad Request", "description": "Invalid interval" }
                }
            })))
            .mount(&server)
            .await;

        let result = adapter(&server)
            .price_series("EURUSD=X", SeriesGranularity::Intraday)
            .await;

        assert!(matches!(result, Err(MarketDataError::ApiError { .. })));
    }

    #[tokio::test]
    async fn server_error_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let result = adapter(&server)
            .price_series("EURUSD=X", SeriesGranularity::Intraday)
            .await;

        let Err(MarketDataError::ApiError { message }) = &result else {
            panic!("expected api error, got {result:?}");
        };
        assert!(message.contains("503"));
    }

    #[tokio::test]
    async fn malformed_json_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let result = adapter(&server)
            .price_series("EURUSD=X", SeriesGranularity::Daily)
            .await;

        assert!(matches!(result, Err(MarketDataError::ParseError { .. })));
    }

    #[tokio::test]
    async fn unreachable_host_is_connection_error() {
        // Reserve a port, then release it so nothing is listening
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let config = MarketDataConfig {
            base_url: format!("http://127.0.0.1:{port}"),
            user_agent: "test-agent".to_string(),
            request_timeout_secs: Some(2),
        };
        let adapter = YahooChartAdapter::new(&config).unwrap();

        let result = adapter
            .price_series("EURUSD=X", SeriesGranularity::Daily)
            .await;

        assert!(matches!(
            result,
            Err(MarketDataError::ConnectionError { .. })
        ));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("hi", 10), "hi");
    }
}
