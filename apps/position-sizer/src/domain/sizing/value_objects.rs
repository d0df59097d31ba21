//! Sizing inputs and outputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Everything the sizer needs, captured when the trader asks for a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Planned entry price.
    pub entry_price: Decimal,
    /// Stop-loss price.
    pub stop_loss_price: Decimal,
    /// Quote-currency value of one point for one lot.
    pub contract_size: Decimal,
    /// Quote currency to USD.
    pub exchange_rate: Decimal,
    /// Maximum acceptable loss in USD.
    pub max_risk_amount: Decimal,
}

/// Derived sizing figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Absolute entry/stop distance in points.
    pub stop_distance: Decimal,
    /// USD value of one point for one lot.
    pub value_per_point_usd: Decimal,
    /// USD lost per lot if the stop is hit.
    pub risk_per_lot_usd: Decimal,
    /// Lots that keep the loss at the risk budget.
    pub recommended_lots: Decimal,
}

/// Non-blocking findings about a finished calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SizingWarning {
    /// Lot count above the sanity threshold; usually the wrong contract spec.
    OversizedLots {
        /// Lots calculated.
        lots: Decimal,
        /// Threshold that was exceeded.
        threshold: Decimal,
    },
}
