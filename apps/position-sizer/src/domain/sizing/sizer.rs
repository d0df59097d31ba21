//! Risk-based position sizer.
//!
//! # Example
//!
//! ```rust,ignore
//! use position_sizer::domain::sizing::{CalculationInput, PositionSizer};
//! use rust_decimal_macros::dec;
//!
//! let sizer = PositionSizer::default();
//! let input = CalculationInput {
//!     entry_price: dec!(34000),
//!     stop_loss_price: dec!(33900),
//!     contract_size: dec!(1),
//!     exchange_rate: dec!(1),
//!     max_risk_amount: dec!(3000),
//! };
//!
//! let result = sizer.calculate(&input)?;
//! assert_eq!(result.recommended_lots, dec!(30));
//! ```

use rust_decimal::Decimal;

use super::{CalculationInput, CalculationResult, SizingError, SizingWarning};

/// Lot count above which a result is flagged as implausible.
pub const DEFAULT_OVERSIZE_LOT_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Configuration for the position sizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionSizerConfig {
    /// Results with more lots than this carry an [`SizingWarning::OversizedLots`].
    pub oversize_lot_threshold: Decimal,
}

impl Default for PositionSizerConfig {
    fn default() -> Self {
        Self {
            oversize_lot_threshold: DEFAULT_OVERSIZE_LOT_THRESHOLD,
        }
    }
}

/// Apply the sizing formula without the entry/stop precondition.
///
/// A zero stop distance (or zero point value) yields exactly zero lots.
/// Fails only when an intermediate figure exceeds `Decimal`'s range.
pub fn size_position(input: &CalculationInput) -> Result<CalculationResult, SizingError> {
    let stop_distance = input
        .entry_price
        .checked_sub(input.stop_loss_price)
        .ok_or(SizingError::Overflow)?
        .abs();
    let value_per_point_usd = input
        .contract_size
        .checked_mul(input.exchange_rate)
        .ok_or(SizingError::Overflow)?;
    let risk_per_lot_usd = stop_distance
        .checked_mul(value_per_point_usd)
        .ok_or(SizingError::Overflow)?;

    let recommended_lots = if risk_per_lot_usd > Decimal::ZERO {
        input
            .max_risk_amount
            .checked_div(risk_per_lot_usd)
            .ok_or(SizingError::Overflow)?
    } else {
        Decimal::ZERO
    };

    Ok(CalculationResult {
        stop_distance,
        value_per_point_usd,
        risk_per_lot_usd,
        recommended_lots,
    })
}

/// Position sizer with the entry/stop precondition and the sanity check.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionSizer {
    config: PositionSizerConfig,
}

impl PositionSizer {
    /// Create a sizer with custom configuration.
    #[must_use]
    pub const fn with_config(config: PositionSizerConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &PositionSizerConfig {
        &self.config
    }

    /// Size a position.
    ///
    /// Only runs when both entry and stop-loss are strictly positive.
    pub fn calculate(&self, input: &CalculationInput) -> Result<CalculationResult, SizingError> {
        if input.entry_price <= Decimal::ZERO || input.stop_loss_price <= Decimal::ZERO {
            return Err(SizingError::NonPositivePrice {
                entry: input.entry_price,
                stop_loss: input.stop_loss_price,
            });
        }

        size_position(input)
    }

    /// Warnings to show alongside a result.
    #[must_use]
    pub fn warnings(&self, result: &CalculationResult) -> Vec<SizingWarning> {
        let threshold = self.config.oversize_lot_threshold;
        if result.recommended_lots > threshold {
            vec![SizingWarning::OversizedLots {
                lots: result.recommended_lots,
                threshold,
            }]
        } else {
            Vec::new()
        }
    }
}
