//! Result Presenter
//!
//! Number formatting and display states. No calculation happens here.
//!
//! | Figure | Format |
//! |--------|--------|
//! | stop distance | 1 decimal |
//! | value per point, risk per lot | `$` and 2 decimals |
//! | lots (headline) | 2 decimals |
//! | lots (breakdown) | 4 decimals |
//! | exchange rate | 4 decimals |

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::instrument::QuoteCurrency;
use crate::domain::quote::RateQuote;
use crate::domain::sizing::{CalculationResult, SizingError, SizingWarning};

/// Warning shown when entry or stop-loss is not positive.
pub const INVALID_PRICES_MESSAGE: &str = "Enter entry and stop-loss prices greater than 0";

/// Warning shown when the lot count is implausibly large.
pub const OVERSIZED_LOTS_MESSAGE: &str =
    "Lot size is unusually large; check the contract specification";

/// Styling class of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayTone {
    /// Live data.
    Success,
    /// Neutral information.
    Info,
    /// Degraded data or questionable input.
    Warning,
    /// Result needs attention.
    Error,
}

impl DisplayTone {
    /// CSS class name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A message and how to style it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMessage {
    /// Styling class.
    pub tone: DisplayTone,
    /// Text.
    pub message: String,
}

impl DisplayMessage {
    fn new(tone: DisplayTone, message: impl Into<String>) -> Self {
        Self {
            tone,
            message: message.into(),
        }
    }
}

/// Formatted calculation figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedResult {
    /// Stop distance in points, 1 decimal.
    pub stop_distance: String,
    /// USD per point, currency style.
    pub value_per_point_usd: String,
    /// USD risk per lot, currency style.
    pub risk_per_lot_usd: String,
    /// Lots, 2 decimals.
    pub lots_headline: String,
    /// Lots, 4 decimals.
    pub lots_detail: String,
    /// Step-by-step explanation.
    pub breakdown: Vec<String>,
}

/// Inputs echoed in the breakdown.
#[derive(Debug, Clone, Copy)]
pub struct BreakdownContext {
    /// Quote currency of the instrument.
    pub currency: QuoteCurrency,
    /// Rate used.
    pub exchange_rate: Decimal,
    /// Point value in quote currency.
    pub contract_size: Decimal,
    /// Risk budget in USD.
    pub max_risk: Decimal,
}

/// Round half away from zero and print exactly `dp` decimals.
#[must_use]
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded.to_string()
}

/// `$` plus two decimals.
#[must_use]
pub fn format_usd(value: Decimal) -> String {
    format!("${}", format_fixed(value, 2))
}

/// Display state of a rate quote.
#[must_use]
pub fn present_rate(quote: &RateQuote) -> DisplayMessage {
    match quote {
        RateQuote::NoConversion => DisplayMessage::new(DisplayTone::Info, "1.0 (USD)"),
        RateQuote::ManualEntry => DisplayMessage::new(DisplayTone::Info, "Manual input"),
        RateQuote::Fresh { rate, as_of } => DisplayMessage::new(
            DisplayTone::Success,
            format!("{} (updated {})", format_fixed(*rate, 4), as_of.format("%H:%M")),
        ),
        RateQuote::Stale { rate, .. } => DisplayMessage::new(
            DisplayTone::Warning,
            format!("{} (daily close)", format_fixed(*rate, 4)),
        ),
        RateQuote::Unavailable => DisplayMessage::new(DisplayTone::Warning, "Rate unavailable"),
        RateQuote::Error { .. } => DisplayMessage::new(DisplayTone::Warning, "Connection error"),
    }
}

/// Format a calculation result with its breakdown.
#[must_use]
pub fn present_result(result: &CalculationResult, context: &BreakdownContext) -> FormattedResult {
    let currency = context.currency.code();
    let value_per_point = format_usd(result.value_per_point_usd);
    let lots_detail = format_fixed(result.recommended_lots, 4);

    let breakdown = vec![
        format!(
            "Exchange rate: {currency}/USD = {}",
            format_fixed(context.exchange_rate, 4)
        ),
        format!(
            "Contract value: {} {currency} per point = {value_per_point} USD per point",
            context.contract_size.normalize()
        ),
        format!(
            "Risk budget: {} / risk per lot {} = {lots_detail} lots",
            context.max_risk.normalize(),
            format_fixed(result.risk_per_lot_usd, 2)
        ),
    ];

    FormattedResult {
        stop_distance: format_fixed(result.stop_distance, 1),
        value_per_point_usd: value_per_point,
        risk_per_lot_usd: format_usd(result.risk_per_lot_usd),
        lots_headline: format_fixed(result.recommended_lots, 2),
        lots_detail,
        breakdown,
    }
}

/// Display state of a sizing warning.
#[must_use]
pub fn present_warning(warning: &SizingWarning) -> DisplayMessage {
    match warning {
        SizingWarning::OversizedLots { .. } => {
            DisplayMessage::new(DisplayTone::Error, OVERSIZED_LOTS_MESSAGE)
        }
    }
}

/// Display state of a calculation that was not performed.
#[must_use]
pub fn present_rejection(error: &SizingError) -> DisplayMessage {
    match error {
        SizingError::NonPositivePrice { .. } => {
            DisplayMessage::new(DisplayTone::Warning, INVALID_PRICES_MESSAGE)
        }
        SizingError::Overflow => DisplayMessage::new(DisplayTone::Warning, error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use rust_decimal_macros::dec;

    #[test]
    fn format_fixed_pads_and_rounds() {
        assert_eq!(format_fixed(dec!(100), 1), "100.0");
        assert_eq!(format_fixed(dec!(2.181818), 2), "2.18");
        assert_eq!(format_fixed(dec!(2.181818), 4), "2.1818");
        assert_eq!(format_fixed(dec!(0.125), 2), "0.13");
        assert_eq!(format_fixed(Decimal::ZERO, 2), "0.00");
    }

    #[test]
    fn format_usd_has_two_decimals() {
        assert_eq!(format_usd(dec!(27.5)), "$27.50");
        assert_eq!(format_usd(dec!(1375)), "$1375.00");
    }

    #[test]
    fn fresh_rate_shows_time() {
        let as_of = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 3, 2, 9, 5, 0)
            .unwrap();
        let display = present_rate(&RateQuote::Fresh {
            rate: dec!(1.08419),
            as_of,
        });

        assert_eq!(display.tone, DisplayTone::Success);
        assert_eq!(display.message, "1.0842 (updated 09:05)");
    }

    #[test]
    fn degraded_rates_are_warnings() {
        let error = present_rate(&RateQuote::Error {
            message: "timeout".to_string(),
        });
        assert_eq!(error.tone, DisplayTone::Warning);
        assert_eq!(error.message, "Connection error");

        let unavailable = present_rate(&RateQuote::Unavailable);
        assert_eq!(unavailable.tone, DisplayTone::Warning);

        let usd = present_rate(&RateQuote::NoConversion);
        assert_eq!(usd.tone, DisplayTone::Info);
        assert_eq!(usd.message, "1.0 (USD)");
    }

    #[test]
    fn result_formatting_matches_ger40_example() {
        let result = CalculationResult {
            stop_distance: dec!(50),
            value_per_point_usd: dec!(27.50),
            risk_per_lot_usd: dec!(1375.00),
            recommended_lots: dec!(3000) / dec!(1375),
        };
        let context = BreakdownContext {
            currency: QuoteCurrency::Eur,
            exchange_rate: dec!(1.10),
            contract_size: dec!(25),
            max_risk: dec!(3000),
        };

        let formatted = present_result(&result, &context);

        assert_eq!(formatted.stop_distance, "50.0");
        assert_eq!(formatted.value_per_point_usd, "$27.50");
        assert_eq!(formatted.risk_per_lot_usd, "$1375.00");
        assert_eq!(formatted.lots_headline, "2.18");
        assert_eq!(formatted.lots_detail, "2.1818");
        assert_eq!(formatted.breakdown[0], "Exchange rate: EUR/USD = 1.1000");
        assert_eq!(
            formatted.breakdown[1],
            "Contract value: 25 EUR per point = $27.50 USD per point"
        );
        assert_eq!(
            formatted.breakdown[2],
            "Risk budget: 3000 / risk per lot 1375.00 = 2.1818 lots"
        );
    }

    #[test]
    fn rejection_and_warning_messages() {
        let rejected = present_rejection(&SizingError::NonPositivePrice {
            entry: Decimal::ZERO,
            stop_loss: dec!(100),
        });
        assert_eq!(rejected.message, INVALID_PRICES_MESSAGE);

        let oversized = present_warning(&SizingWarning::OversizedLots {
            lots: dec!(75),
            threshold: dec!(50),
        });
        assert_eq!(oversized.tone, DisplayTone::Error);
        assert_eq!(oversized.message, OVERSIZED_LOTS_MESSAGE);
    }
}
