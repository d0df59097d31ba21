//! Load Instrument Use Case
//!
//! One page render: look the instrument up, then fetch its rate and its
//! reference price, one after the other.

use std::sync::Arc;

use crate::application::ports::MarketDataPort;
use crate::application::services::QuoteFetcher;
use crate::domain::instrument::{CatalogError, Instrument, InstrumentCatalog};
use crate::domain::quote::{RateQuote, ReferencePrice};

/// An instrument with freshly fetched quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentSnapshot {
    /// Catalog entry.
    pub instrument: &'static Instrument,
    /// Rate lookup outcome.
    pub rate: RateQuote,
    /// Reference price lookup outcome.
    pub reference_price: ReferencePrice,
}

/// Use case for loading an instrument and its quotes.
pub struct LoadInstrumentUseCase<M>
where
    M: MarketDataPort,
{
    fetcher: QuoteFetcher<M>,
}

impl<M> LoadInstrumentUseCase<M>
where
    M: MarketDataPort,
{
    /// Create a new LoadInstrumentUseCase.
    pub fn new(market_data: Arc<M>) -> Self {
        Self {
            fetcher: QuoteFetcher::new(market_data),
        }
    }

    /// Execute the use case.
    pub async fn execute(&self, name: &str) -> Result<InstrumentSnapshot, CatalogError> {
        let instrument = InstrumentCatalog::lookup(name)?;
        Ok(self.load(instrument).await)
    }

    /// Fetch quotes for an already resolved instrument.
    pub async fn load(&self, instrument: &'static Instrument) -> InstrumentSnapshot {
        let rate = self.fetcher.fetch_rate(instrument.conversion).await;
        let reference_price = self
            .fetcher
            .fetch_reference_price(instrument.index_symbol)
            .await;

        tracing::info!(
            instrument = %instrument.id,
            rate_status = %rate.status(),
            reference = %reference_price.or_zero(),
            "Instrument quotes loaded"
        );

        InstrumentSnapshot {
            instrument,
            rate,
            reference_price,
        }
    }
}
