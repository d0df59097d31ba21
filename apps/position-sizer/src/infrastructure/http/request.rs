//! HTTP request types.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Submit button value that asks for a calculation.
pub const ACTION_CALCULATE: &str = "calculate";

/// Query string of the calculator page.
///
/// Every field arrives as raw text so a half-typed number never turns into a
/// rejected request; unparseable values fall back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculatorForm {
    /// Instrument code or display name.
    pub instrument: Option<String>,
    /// Contract spec label.
    pub spec: Option<String>,
    /// Point value for the Custom instrument.
    pub custom_point_value: Option<String>,
    /// Risk budget in USD.
    pub max_risk: Option<String>,
    /// Manual exchange rate.
    pub manual_rate: Option<String>,
    /// Entry price.
    pub entry: Option<String>,
    /// Stop-loss price.
    pub stop: Option<String>,
    /// Instrument the entry/stop fields were last filled for.
    pub loaded_instrument: Option<String>,
    /// Submit button pressed, if any.
    pub action: Option<String>,
}

impl CalculatorForm {
    /// Whether the calculate button was pressed.
    #[must_use]
    pub fn wants_calculation(&self) -> bool {
        self.action.as_deref() == Some(ACTION_CALCULATE)
    }

    /// Whether entry/stop belong to a different instrument than `code`.
    #[must_use]
    pub fn instrument_changed(&self, code: &str) -> bool {
        self.loaded_instrument
            .as_deref()
            .is_none_or(|loaded| !loaded.eq_ignore_ascii_case(code))
    }
}

/// Parse an optional numeric field. Blank or malformed input yields `None`.
#[must_use]
pub fn parse_decimal(raw: Option<&str>) -> Option<Decimal> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}
