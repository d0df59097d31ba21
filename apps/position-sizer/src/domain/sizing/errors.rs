//! Sizing errors.

use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a calculation is not performed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizingError {
    /// Entry or stop-loss price is zero or negative.
    #[error("Entry and stop-loss prices must be greater than 0 (entry {entry}, stop {stop_loss})")]
    NonPositivePrice {
        /// Entry price supplied.
        entry: Decimal,
        /// Stop-loss price supplied.
        stop_loss: Decimal,
    },

    /// An intermediate figure is outside the representable range.
    #[error("Calculation overflow; check the size of the inputs")]
    Overflow,
}
