//! Instrument value objects.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CatalogError;

/// Identifier of a catalog instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentId {
    /// German DAX 40.
    #[serde(rename = "GER40")]
    Ger40,
    /// FTSE 100.
    #[serde(rename = "UK100")]
    Uk100,
    /// Dow Jones Industrial Average.
    #[serde(rename = "US30")]
    Us30,
    /// Euro Stoxx 50.
    #[serde(rename = "EU50")]
    Eu50,
    /// S&P/ASX 200.
    #[serde(rename = "AUS200")]
    Aus200,
    /// User-defined instrument with manual point value and rate.
    Custom,
}

impl InstrumentId {
    /// Short code used in URLs and API payloads.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ger40 => "GER40",
            Self::Uk100 => "UK100",
            Self::Us30 => "US30",
            Self::Eu50 => "EU50",
            Self::Aus200 => "AUS200",
            Self::Custom => "CUSTOM",
        }
    }

    /// Human-readable name shown in the instrument selector.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Ger40 => "GER40 (DAX)",
            Self::Uk100 => "UK100 (FTSE)",
            Self::Us30 => "US30 (Dow Jones)",
            Self::Eu50 => "EU50 (Stoxx 50)",
            Self::Aus200 => "AUS200 (ASX 200)",
            Self::Custom => "Custom",
        }
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Currency an instrument is quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteCurrency {
    /// Euro.
    Eur,
    /// Pound sterling.
    Gbp,
    /// US dollar.
    Usd,
    /// Australian dollar.
    Aud,
    /// User-defined; the rate is entered manually.
    Custom,
}

impl QuoteCurrency {
    /// ISO code, or `Custom`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Usd => "USD",
            Self::Aud => "AUD",
            Self::Custom => "Custom",
        }
    }
}

impl fmt::Display for QuoteCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// How the quote currency converts into USD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversionMode {
    /// Already USD; rate is exactly 1.
    NoConversion,
    /// The trader supplies the rate.
    ManualEntry,
    /// Rate is fetched from the market-data source.
    FetchedRate {
        /// FX pair symbol, e.g. `EURUSD=X`.
        symbol: &'static str,
    },
}

/// A contract specification: label plus point value in quote currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContractSpec {
    /// Label shown in the spec selector.
    pub label: &'static str,
    /// Quote-currency value of a one-point move for one lot.
    pub point_value: Decimal,
}

/// A catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instrument {
    /// Identifier.
    pub id: InstrumentId,
    /// Quote currency.
    pub currency: QuoteCurrency,
    /// Offered contract specs, in display order. Never empty.
    pub contract_specs: &'static [ContractSpec],
    /// Currency conversion into USD.
    pub conversion: ConversionMode,
    /// Symbol for the reference opening price.
    pub index_symbol: Option<&'static str>,
}

impl Instrument {
    /// Display name of the instrument.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.id.display_name()
    }

    /// Whether the point value and rate come from the trader.
    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self.id, InstrumentId::Custom)
    }

    /// First (default) contract spec.
    #[must_use]
    pub const fn default_spec(&self) -> &'static ContractSpec {
        &self.contract_specs[0]
    }

    /// Find a contract spec by its label.
    pub fn contract_spec(&self, label: &str) -> Result<&'static ContractSpec, CatalogError> {
        self.contract_specs
            .iter()
            .find(|spec| spec.label == label)
            .ok_or_else(|| CatalogError::UnknownContractSpec {
                instrument: self.id.code().to_string(),
                label: label.to_string(),
            })
    }
}
