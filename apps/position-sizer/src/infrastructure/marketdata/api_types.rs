//! Yahoo Finance chart API response types.

use serde::Deserialize;

/// Top-level chart response.
#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    /// Chart payload.
    pub chart: ChartEnvelope,
}

/// Result or error of a chart request.
#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    /// One entry per requested symbol.
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    /// Present when the request failed.
    #[serde(default)]
    pub error: Option<ChartError>,
}

/// Chart error body.
#[derive(Debug, Deserialize)]
pub struct ChartError {
    /// Error code, e.g. `Not Found`.
    pub code: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

/// Series for one symbol.
#[derive(Debug, Deserialize)]
pub struct ChartResult {
    /// Series metadata.
    pub meta: ChartMeta,
    /// Bar timestamps (Unix seconds). Absent when the range has no bars.
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    /// Price arrays aligned with `timestamp`.
    pub indicators: Indicators,
}

/// Series metadata.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    /// Symbol echoed back.
    #[serde(default)]
    pub symbol: String,
    /// Quote currency.
    #[serde(default)]
    pub currency: Option<String>,
    /// Exchange name.
    #[serde(default)]
    pub exchange_name: Option<String>,
    /// Exchange offset from UTC in seconds.
    #[serde(default)]
    pub gmtoffset: i32,
}

/// Indicator arrays.
#[derive(Debug, Deserialize)]
pub struct Indicators {
    /// OHLC arrays; the first entry is used.
    #[serde(default)]
    pub quote: Vec<QuoteIndicator>,
}

/// OHLC arrays with nulls for missing bars.
#[derive(Debug, Default, Deserialize)]
pub struct QuoteIndicator {
    /// Opening prices.
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    /// Closing prices.
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}
