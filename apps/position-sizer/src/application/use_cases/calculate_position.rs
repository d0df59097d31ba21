//! Calculate Position Use Case
//!
//! Resolves a trader's request against the catalog, fetches the exchange
//! rate, and runs the sizer.

use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::application::dto::PositionRequestDto;
use crate::application::ports::MarketDataPort;
use crate::application::services::QuoteFetcher;
use crate::domain::instrument::{CatalogError, ConversionMode, Instrument, InstrumentCatalog};
use crate::domain::quote::RateQuote;
use crate::domain::sizing::{
    CalculationInput, CalculationResult, PositionSizer, SizingError, SizingWarning,
};
use crate::observability::metrics::record_calculation;

/// Values used when the trader leaves an input blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculatorDefaults {
    /// Risk budget in USD.
    pub max_risk: Decimal,
    /// Exchange rate for manual conversion.
    pub manual_rate: Decimal,
    /// Point value for the Custom instrument.
    pub custom_point_value: Decimal,
}

impl Default for CalculatorDefaults {
    fn default() -> Self {
        Self {
            max_risk: Decimal::from(3000),
            manual_rate: Decimal::ONE,
            custom_point_value: Decimal::ONE,
        }
    }
}

/// Errors that prevent a request from reaching the sizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculationRequestError {
    /// Instrument or contract spec lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A value that must be strictly positive was not.
    #[error("{field} must be greater than 0, got {value}")]
    NonPositiveInput {
        /// Request field name.
        field: &'static str,
        /// Value supplied.
        value: Decimal,
    },
}

/// What the sizer made of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizingOutcome {
    /// A result, possibly with warnings.
    Sized {
        /// Derived figures.
        result: CalculationResult,
        /// Sanity warnings.
        warnings: Vec<SizingWarning>,
    },
    /// The sizer declined to run.
    Rejected(SizingError),
}

/// A calculation together with the inputs it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationOutcome {
    /// Catalog entry.
    pub instrument: &'static Instrument,
    /// Point value used.
    pub contract_size: Decimal,
    /// Exchange rate used.
    pub exchange_rate: Decimal,
    /// Risk budget used.
    pub max_risk: Decimal,
    /// Rate lookup behind `exchange_rate`.
    pub rate: RateQuote,
    /// Sizer outcome.
    pub sizing: SizingOutcome,
}

/// Use case for sizing a position.
pub struct CalculatePositionUseCase<M>
where
    M: MarketDataPort,
{
    fetcher: QuoteFetcher<M>,
    sizer: PositionSizer,
    defaults: CalculatorDefaults,
}

impl<M> CalculatePositionUseCase<M>
where
    M: MarketDataPort,
{
    /// Create a new CalculatePositionUseCase.
    pub fn new(market_data: Arc<M>, sizer: PositionSizer, defaults: CalculatorDefaults) -> Self {
        Self {
            fetcher: QuoteFetcher::new(market_data),
            sizer,
            defaults,
        }
    }

    /// Defaults applied to blank inputs.
    pub const fn defaults(&self) -> &CalculatorDefaults {
        &self.defaults
    }

    /// Execute the use case, fetching a fresh rate for the instrument.
    pub async fn execute(
        &self,
        request: &PositionRequestDto,
    ) -> Result<CalculationOutcome, CalculationRequestError> {
        let instrument = InstrumentCatalog::lookup(&request.instrument)?;
        let rate = self.fetcher.fetch_rate(instrument.conversion).await;
        self.calculate_with_quote(instrument, request, rate)
    }

    /// Size a position using a rate that was already fetched.
    ///
    /// `request.instrument` is ignored; `instrument` is authoritative.
    pub fn calculate_with_quote(
        &self,
        instrument: &'static Instrument,
        request: &PositionRequestDto,
        rate: RateQuote,
    ) -> Result<CalculationOutcome, CalculationRequestError> {
        // 1. Resolve the point value
        let contract_size = if instrument.is_custom() {
            positive(
                "custom_point_value",
                request
                    .custom_point_value
                    .unwrap_or(self.defaults.custom_point_value),
            )?
        } else {
            match request.contract_spec.as_deref() {
                Some(label) => instrument.contract_spec(label)?.point_value,
                None => instrument.default_spec().point_value,
            }
        };

        // 2. Resolve the risk budget
        let max_risk = positive(
            "max_risk",
            request.max_risk.unwrap_or(self.defaults.max_risk),
        )?;

        // 3. Resolve the exchange rate
        let exchange_rate = match instrument.conversion {
            ConversionMode::ManualEntry => positive(
                "manual_rate",
                request.manual_rate.unwrap_or(self.defaults.manual_rate),
            )?,
            ConversionMode::NoConversion | ConversionMode::FetchedRate { .. } => {
                rate.rate_or(Decimal::ONE)
            }
        };

        // 4. Size
        let input = CalculationInput {
            entry_price: request.entry_price,
            stop_loss_price: request.stop_loss_price,
            contract_size,
            exchange_rate,
            max_risk_amount: max_risk,
        };

        let sizing = match self.sizer.calculate(&input) {
            Ok(result) => {
                let warnings = self.sizer.warnings(&result);
                record_calculation(if warnings.is_empty() {
                    "sized"
                } else {
                    "oversized"
                });
                tracing::info!(
                    instrument = %instrument.id,
                    lots = %result.recommended_lots,
                    risk_per_lot = %result.risk_per_lot_usd,
                    rate_status = %rate.status(),
                    "Position sized"
                );
                SizingOutcome::Sized { result, warnings }
            }
            Err(e) => {
                record_calculation(match e {
                    SizingError::NonPositivePrice { .. } => "invalid_prices",
                    SizingError::Overflow => "overflow",
                });
                tracing::debug!(instrument = %instrument.id, error = %e, "Calculation rejected");
                SizingOutcome::Rejected(e)
            }
        };

        Ok(CalculationOutcome {
            instrument,
            contract_size,
            exchange_rate,
            max_risk,
            rate,
            sizing,
        })
    }
}

fn positive(field: &'static str, value: Decimal) -> Result<Decimal, CalculationRequestError> {
    if value > Decimal::ZERO {
        Ok(value)
    } else {
        Err(CalculationRequestError::NonPositiveInput { field, value })
    }
}
