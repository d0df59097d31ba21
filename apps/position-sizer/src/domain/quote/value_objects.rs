//! Quote value objects.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Freshness of a quote lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteStatus {
    /// Intraday tick available.
    Fresh,
    /// Fell back to the daily close.
    Stale,
    /// Source returned no data.
    Unavailable,
    /// Source could not be reached or parsed.
    Error,
}

impl QuoteStatus {
    /// Lowercase label used for metrics and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::Stale => "stale",
            Self::Unavailable => "unavailable",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a quote-currency/USD rate lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateQuote {
    /// Instrument is quoted in USD.
    NoConversion,
    /// Trader must supply the rate.
    ManualEntry,
    /// Last intraday close.
    Fresh {
        /// Rate value.
        rate: Decimal,
        /// Bar timestamp in exchange time.
        as_of: DateTime<FixedOffset>,
    },
    /// Daily close, used when no intraday bar exists.
    Stale {
        /// Rate value.
        rate: Decimal,
        /// Bar timestamp in exchange time.
        as_of: DateTime<FixedOffset>,
    },
    /// Neither series had data.
    Unavailable,
    /// Lookup failed.
    Error {
        /// Failure description.
        message: String,
    },
}

impl RateQuote {
    /// Status as seen by the caller. USD counts as fresh; manual entry has no quote.
    #[must_use]
    pub const fn status(&self) -> QuoteStatus {
        match self {
            Self::NoConversion | Self::Fresh { .. } => QuoteStatus::Fresh,
            Self::Stale { .. } => QuoteStatus::Stale,
            Self::ManualEntry | Self::Unavailable => QuoteStatus::Unavailable,
            Self::Error { .. } => QuoteStatus::Error,
        }
    }

    /// The quoted rate, if one exists.
    #[must_use]
    pub const fn rate(&self) -> Option<Decimal> {
        match self {
            Self::NoConversion => Some(Decimal::ONE),
            Self::Fresh { rate, .. } | Self::Stale { rate, .. } => Some(*rate),
            Self::ManualEntry | Self::Unavailable | Self::Error { .. } => None,
        }
    }

    /// Timestamp of the quoted bar.
    #[must_use]
    pub const fn as_of(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::Fresh { as_of, .. } | Self::Stale { as_of, .. } => Some(*as_of),
            _ => None,
        }
    }

    /// Rate to calculate with: the quote, or `fallback` when there is none.
    #[must_use]
    pub fn rate_or(&self, fallback: Decimal) -> Decimal {
        self.rate().unwrap_or(fallback)
    }
}

/// Result of an index reference-price lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferencePrice {
    /// Opening price of the most recent daily bar.
    Available {
        /// Opening price.
        open: Decimal,
        /// Bar timestamp in exchange time.
        as_of: DateTime<FixedOffset>,
    },
    /// No symbol, no data, or the lookup failed.
    Unavailable,
}

impl ReferencePrice {
    /// Opening price, or zero when unavailable.
    #[must_use]
    pub const fn or_zero(&self) -> Decimal {
        match self {
            Self::Available { open, .. } => *open,
            Self::Unavailable => Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn bar_time() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2026, 3, 2, 15, 42, 0)
            .unwrap()
    }

    #[test]
    fn usd_is_fresh_with_unit_rate() {
        let quote = RateQuote::NoConversion;
        assert_eq!(quote.status(), QuoteStatus::Fresh);
        assert_eq!(quote.rate(), Some(Decimal::ONE));
        assert!(quote.as_of().is_none());
    }

    #[test]
    fn manual_entry_is_unavailable() {
        let quote = RateQuote::ManualEntry;
        assert_eq!(quote.status(), QuoteStatus::Unavailable);
        assert_eq!(quote.rate(), None);
    }

    #[test]
    fn error_falls_back_to_default_rate() {
        let quote = RateQuote::Error {
            message: "connection refused".to_string(),
        };
        assert_eq!(quote.status(), QuoteStatus::Error);
        assert_eq!(quote.rate_or(Decimal::ONE), Decimal::ONE);
    }

    #[test]
    fn stale_keeps_rate_and_timestamp() {
        let quote = RateQuote::Stale {
            rate: dec!(1.0842),
            as_of: bar_time(),
        };
        assert_eq!(quote.status(), QuoteStatus::Stale);
        assert_eq!(quote.rate_or(Decimal::ONE), dec!(1.0842));
        assert_eq!(quote.as_of(), Some(bar_time()));
    }

    #[test]
    fn reference_price_or_zero() {
        let available = ReferencePrice::Available {
            open: dec!(18012.5),
            as_of: bar_time(),
        };
        assert_eq!(available.or_zero(), dec!(18012.5));
        assert_eq!(ReferencePrice::Unavailable.or_zero(), Decimal::ZERO);
    }
}
