//! Calculation request/response DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::presenter::{
    BreakdownContext, DisplayMessage, FormattedResult, present_rate, present_rejection,
    present_result, present_warning,
};
use crate::application::use_cases::{CalculationOutcome, SizingOutcome};
use crate::domain::instrument::InstrumentId;
use crate::domain::quote::QuoteStatus;
use crate::domain::sizing::{CalculationResult, SizingError, SizingWarning};

/// Inputs gathered from the trader.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PositionRequestDto {
    /// Instrument code or display name.
    pub instrument: String,
    /// Contract spec label (defaults to the instrument's first spec).
    #[serde(default)]
    pub contract_spec: Option<String>,
    /// Point value for the Custom instrument.
    #[serde(default)]
    pub custom_point_value: Option<Decimal>,
    /// Risk budget in USD.
    #[serde(default)]
    pub max_risk: Option<Decimal>,
    /// Exchange rate for manual conversion.
    #[serde(default)]
    pub manual_rate: Option<Decimal>,
    /// Entry price.
    pub entry_price: Decimal,
    /// Stop-loss price.
    pub stop_loss_price: Decimal,
}

/// A warning with a machine-readable code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarningDto {
    /// Warning code.
    pub code: String,
    /// Display state.
    #[serde(flatten)]
    pub display: DisplayMessage,
}

impl From<&SizingWarning> for WarningDto {
    fn from(warning: &SizingWarning) -> Self {
        let code = match warning {
            SizingWarning::OversizedLots { .. } => "OVERSIZED_LOTS",
        };
        Self {
            code: code.to_string(),
            display: present_warning(warning),
        }
    }
}

impl From<&SizingError> for WarningDto {
    fn from(error: &SizingError) -> Self {
        let code = match error {
            SizingError::NonPositivePrice { .. } => "INVALID_PRICES",
            SizingError::Overflow => "OVERFLOW",
        };
        Self {
            code: code.to_string(),
            display: present_rejection(error),
        }
    }
}

/// Calculation response.
#[derive(Debug, Clone, Serialize)]
pub struct CalculationResponseDto {
    /// Whether a result was produced.
    pub ok: bool,
    /// Instrument code.
    pub instrument: InstrumentId,
    /// Point value used.
    pub contract_size: Decimal,
    /// Exchange rate used.
    pub exchange_rate: Decimal,
    /// Risk budget used.
    pub max_risk: Decimal,
    /// Status of the rate lookup made for this request.
    pub rate_status: QuoteStatus,
    /// Rate display state.
    pub rate_display: DisplayMessage,
    /// Raw figures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<CalculationResult>,
    /// Formatted figures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<FormattedResult>,
    /// Validation failures and sanity warnings.
    pub warnings: Vec<WarningDto>,
}

impl From<&CalculationOutcome> for CalculationResponseDto {
    fn from(outcome: &CalculationOutcome) -> Self {
        let (result, formatted, warnings) = match &outcome.sizing {
            SizingOutcome::Sized { result, warnings } => {
                let context = BreakdownContext {
                    currency: outcome.instrument.currency,
                    exchange_rate: outcome.exchange_rate,
                    contract_size: outcome.contract_size,
                    max_risk: outcome.max_risk,
                };
                (
                    Some(*result),
                    Some(present_result(result, &context)),
                    warnings.iter().map(WarningDto::from).collect(),
                )
            }
            SizingOutcome::Rejected(error) => (None, None, vec![WarningDto::from(error)]),
        };

        Self {
            ok: result.is_some(),
            instrument: outcome.instrument.id,
            contract_size: outcome.contract_size,
            exchange_rate: outcome.exchange_rate,
            max_risk: outcome.max_risk,
            rate_status: outcome.rate.status(),
            rate_display: present_rate(&outcome.rate),
            result,
            formatted,
            warnings,
        }
    }
}
