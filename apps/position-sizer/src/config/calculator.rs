//! Calculator defaults and sanity thresholds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::use_cases::CalculatorDefaults;
use crate::domain::sizing::{DEFAULT_OVERSIZE_LOT_THRESHOLD, PositionSizerConfig};

/// Calculator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Risk budget in USD pre-filled in the form.
    #[serde(default = "default_max_risk")]
    pub default_max_risk: Decimal,
    /// Exchange rate pre-filled for manual conversion.
    #[serde(default = "default_one")]
    pub default_manual_rate: Decimal,
    /// Point value pre-filled for the Custom instrument.
    #[serde(default = "default_one")]
    pub default_custom_point_value: Decimal,
    /// Lot count above which a result is flagged.
    #[serde(default = "default_oversize_lot_threshold")]
    pub oversize_lot_threshold: Decimal,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            default_max_risk: default_max_risk(),
            default_manual_rate: default_one(),
            default_custom_point_value: default_one(),
            oversize_lot_threshold: default_oversize_lot_threshold(),
        }
    }
}

impl CalculatorConfig {
    /// Defaults for blank calculator inputs.
    #[must_use]
    pub const fn defaults(&self) -> CalculatorDefaults {
        CalculatorDefaults {
            max_risk: self.default_max_risk,
            manual_rate: self.default_manual_rate,
            custom_point_value: self.default_custom_point_value,
        }
    }

    /// Sizer configuration.
    #[must_use]
    pub const fn sizer(&self) -> PositionSizerConfig {
        PositionSizerConfig {
            oversize_lot_threshold: self.oversize_lot_threshold,
        }
    }
}

fn default_max_risk() -> Decimal {
    Decimal::from(3000)
}

const fn default_one() -> Decimal {
    Decimal::ONE
}

const fn default_oversize_lot_threshold() -> Decimal {
    DEFAULT_OVERSIZE_LOT_THRESHOLD
}
