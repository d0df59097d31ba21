//! Sizing Bounded Context
//!
//! Converts a risk budget into a lot count:
//!
//! ```text
//! stop_distance       = |entry - stop_loss|
//! value_per_point_usd = contract_size * exchange_rate
//! risk_per_lot_usd    = stop_distance * value_per_point_usd
//! recommended_lots    = max_risk / risk_per_lot_usd   (0 when risk_per_lot_usd is 0)
//! ```

mod errors;
mod sizer;
mod value_objects;

pub use errors::SizingError;
pub use sizer::{DEFAULT_OVERSIZE_LOT_THRESHOLD, PositionSizer, PositionSizerConfig, size_position};
pub use value_objects::{CalculationInput, CalculationResult, SizingWarning};
