//! Quote Fetcher
//!
//! Turns raw price series into advisory quotes. Failures never propagate:
//! they become [`RateQuote::Error`] / [`RateQuote::Unavailable`] or
//! [`ReferencePrice::Unavailable`], and the caller degrades to defaults.
//!
//! # Rate policy
//!
//! 1. `NoConversion` answers 1.0 without a network call.
//! 2. `ManualEntry` answers "manual" without a network call.
//! 3. Otherwise the last intraday close (fresh), else the daily close
//!    (stale), else unavailable. Transport or parse failures yield an error.
//!
//! There are no retries beyond the intraday to daily step and nothing is
//! cached between calls.

use std::sync::Arc;

use crate::application::ports::{MarketDataError, MarketDataPort, PriceBar, SeriesGranularity};
use crate::domain::instrument::ConversionMode;
use crate::domain::quote::{RateQuote, ReferencePrice};
use crate::observability::metrics::record_quote_fetch;

/// Fetches exchange rates and reference prices through a [`MarketDataPort`].
pub struct QuoteFetcher<M>
where
    M: MarketDataPort,
{
    market_data: Arc<M>,
}

impl<M> Clone for QuoteFetcher<M>
where
    M: MarketDataPort,
{
    fn clone(&self) -> Self {
        Self {
            market_data: Arc::clone(&self.market_data),
        }
    }
}

impl<M> QuoteFetcher<M>
where
    M: MarketDataPort,
{
    /// Create a new QuoteFetcher.
    pub const fn new(market_data: Arc<M>) -> Self {
        Self { market_data }
    }

    /// Fetch the quote-currency/USD rate for an instrument's conversion mode.
    pub async fn fetch_rate(&self, conversion: ConversionMode) -> RateQuote {
        let quote = match conversion {
            ConversionMode::NoConversion => RateQuote::NoConversion,
            ConversionMode::ManualEntry => RateQuote::ManualEntry,
            ConversionMode::FetchedRate { symbol } => self.fetch_market_rate(symbol).await,
        };

        record_quote_fetch("rate", quote.status().as_str());
        quote
    }

    /// Fetch the opening price of the most recent daily bar.
    ///
    /// Any failure is logged and reported as [`ReferencePrice::Unavailable`].
    pub async fn fetch_reference_price(&self, index_symbol: Option<&str>) -> ReferencePrice {
        let Some(symbol) = index_symbol else {
            return ReferencePrice::Unavailable;
        };

        let price = match self
            .market_data
            .price_series(symbol, SeriesGranularity::Daily)
            .await
        {
            Ok(bars) => bars.last().map_or(ReferencePrice::Unavailable, |bar| {
                ReferencePrice::Available {
                    open: bar.open,
                    as_of: bar.timestamp,
                }
            }),
            Err(e) => {
                tracing::warn!(symbol, error = %e, "Reference price lookup failed");
                ReferencePrice::Unavailable
            }
        };

        let status = match price {
            ReferencePrice::Available { .. } => "fresh",
            ReferencePrice::Unavailable => "unavailable",
        };
        record_quote_fetch("reference", status);
        price
    }

    async fn fetch_market_rate(&self, symbol: &str) -> RateQuote {
        match self.last_bar(symbol, SeriesGranularity::Intraday).await {
            Ok(Some(bar)) => {
                tracing::debug!(symbol, rate = %bar.close, "Intraday rate");
                return RateQuote::Fresh {
                    rate: bar.close,
                    as_of: bar.timestamp,
                };
            }
            Ok(None) => {}
            Err(e) => return rate_error(symbol, &e),
        }

        match self.last_bar(symbol, SeriesGranularity::Daily).await {
            Ok(Some(bar)) => {
                tracing::info!(symbol, rate = %bar.close, "No intraday bars, using daily close");
                RateQuote::Stale {
                    rate: bar.close,
                    as_of: bar.timestamp,
                }
            }
            Ok(None) => {
                tracing::warn!(symbol, "No rate data available");
                RateQuote::Unavailable
            }
            Err(e) => rate_error(symbol, &e),
        }
    }

    /// Last bar of a series. An unknown symbol counts as an empty series.
    async fn last_bar(
        &self,
        symbol: &str,
        granularity: SeriesGranularity,
    ) -> Result<Option<PriceBar>, MarketDataError> {
        match self.market_data.price_series(symbol, granularity).await {
            Ok(bars) => Ok(bars.last().copied()),
            Err(MarketDataError::SymbolNotFound { .. }) => {
                tracing::debug!(
                    symbol,
                    granularity = granularity.as_str(),
                    "Symbol not found, treating as empty series"
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

fn rate_error(symbol: &str, error: &MarketDataError) -> RateQuote {
    tracing::warn!(symbol, error = %error, "Rate lookup failed");
    RateQuote::Error {
        message: error.to_string(),
    }
}
