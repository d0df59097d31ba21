//! Market Data Port (Driven Port)
//!
//! Interface for fetching recent price series from an external provider.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Bar size of a requested series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesGranularity {
    /// Finest available bars for the most recent trading day.
    Intraday,
    /// One bar for the most recent trading day.
    Daily,
}

impl SeriesGranularity {
    /// Lowercase label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Intraday => "intraday",
            Self::Daily => "daily",
        }
    }
}

/// One bar of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Bar open time in exchange time.
    pub timestamp: DateTime<FixedOffset>,
    /// Opening price.
    pub open: Decimal,
    /// Closing price.
    pub close: Decimal,
}

/// Market data error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarketDataError {
    /// Provider could not be reached.
    #[error("Market data connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Provider does not know the symbol.
    #[error("Symbol not found: {symbol}")]
    SymbolNotFound {
        /// The unknown symbol.
        symbol: String,
    },

    /// Provider answered with an error status.
    #[error("Market data API error: {message}")]
    ApiError {
        /// Error details.
        message: String,
    },

    /// Response body could not be decoded.
    #[error("Market data parse error: {message}")]
    ParseError {
        /// Error details.
        message: String,
    },
}

/// Port for fetching recent price series.
///
/// Series are time-ordered, oldest first. An empty vector means the provider
/// had no bars for the period.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Fetch the most recent trading day's series for `symbol`.
    async fn price_series(
        &self,
        symbol: &str,
        granularity: SeriesGranularity,
    ) -> Result<Vec<PriceBar>, MarketDataError>;
}
