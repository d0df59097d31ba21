//! Instrument and quote DTOs.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::application::presenter::{DisplayMessage, present_rate};
use crate::application::use_cases::InstrumentSnapshot;
use crate::domain::instrument::{ConversionMode, Instrument, InstrumentId, QuoteCurrency};
use crate::domain::quote::{QuoteStatus, RateQuote, ReferencePrice};

/// DTO for a contract spec.
#[derive(Debug, Clone, Serialize)]
pub struct ContractSpecDto {
    /// Label.
    pub label: String,
    /// Point value in quote currency.
    pub point_value: Decimal,
}

/// DTO for a catalog entry.
#[derive(Debug, Clone, Serialize)]
pub struct InstrumentDto {
    /// Instrument code.
    pub code: InstrumentId,
    /// Display name.
    pub name: String,
    /// Quote currency.
    pub currency: QuoteCurrency,
    /// Currency conversion mode.
    pub conversion: ConversionMode,
    /// Reference price symbol.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_symbol: Option<String>,
    /// Offered contract specs.
    pub contract_specs: Vec<ContractSpecDto>,
}

impl From<&Instrument> for InstrumentDto {
    fn from(instrument: &Instrument) -> Self {
        Self {
            code: instrument.id,
            name: instrument.name().to_string(),
            currency: instrument.currency,
            conversion: instrument.conversion,
            index_symbol: instrument.index_symbol.map(str::to_string),
            contract_specs: instrument
                .contract_specs
                .iter()
                .map(|spec| ContractSpecDto {
                    label: spec.label.to_string(),
                    point_value: spec.point_value,
                })
                .collect(),
        }
    }
}

/// DTO for the quotes of one instrument.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteSnapshotDto {
    /// Instrument code.
    pub instrument: InstrumentId,
    /// Rate lookup outcome.
    pub rate: RateQuote,
    /// Rate status.
    pub rate_status: QuoteStatus,
    /// Rate display state.
    pub rate_display: DisplayMessage,
    /// Reference price lookup outcome.
    pub reference_price: ReferencePrice,
    /// Suggested entry/stop pre-fill (zero when unavailable).
    pub default_price: Decimal,
}

impl From<&InstrumentSnapshot> for QuoteSnapshotDto {
    fn from(snapshot: &InstrumentSnapshot) -> Self {
        Self {
            instrument: snapshot.instrument.id,
            rate: snapshot.rate.clone(),
            rate_status: snapshot.rate.status(),
            rate_display: present_rate(&snapshot.rate),
            reference_price: snapshot.reference_price,
            default_price: snapshot.reference_price.or_zero(),
        }
    }
}
