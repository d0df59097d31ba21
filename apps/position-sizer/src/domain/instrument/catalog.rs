//! Static instrument catalog.

use rust_decimal::Decimal;

use super::{CatalogError, ContractSpec, ConversionMode, Instrument, InstrumentId, QuoteCurrency};

const fn points(value: u32) -> Decimal {
    Decimal::from_parts(value, 0, 0, false, 0)
}

const GER40_SPECS: &[ContractSpec] = &[
    ContractSpec {
        label: "Retail standard (1 pt = 1 EUR)",
        point_value: points(1),
    },
    ContractSpec {
        label: "Futures (1 pt = 25 EUR)",
        point_value: points(25),
    },
    ContractSpec {
        label: "Mini (1 pt = 10 EUR)",
        point_value: points(10),
    },
];

const UK100_SPECS: &[ContractSpec] = &[
    ContractSpec {
        label: "Retail standard (1 pt = 1 GBP)",
        point_value: points(1),
    },
    ContractSpec {
        label: "Large contract (1 pt = 10 GBP)",
        point_value: points(10),
    },
];

const US30_SPECS: &[ContractSpec] = &[
    ContractSpec {
        label: "Retail standard (1 pt = 1 USD)",
        point_value: points(1),
    },
    ContractSpec {
        label: "Large contract (1 pt = 10 USD)",
        point_value: points(10),
    },
    ContractSpec {
        label: "Special (1 pt = 5 USD)",
        point_value: points(5),
    },
];

const EU50_SPECS: &[ContractSpec] = &[
    ContractSpec {
        label: "Retail standard (1 pt = 1 EUR)",
        point_value: points(1),
    },
    ContractSpec {
        label: "Futures (1 pt = 10 EUR)",
        point_value: points(10),
    },
];

const AUS200_SPECS: &[ContractSpec] = &[
    ContractSpec {
        label: "Retail standard (1 pt = 1 AUD)",
        point_value: points(1),
    },
    ContractSpec {
        label: "Futures (1 pt = 25 AUD)",
        point_value: points(25),
    },
];

// Point value is overridden by the trader's own input.
const CUSTOM_SPECS: &[ContractSpec] = &[ContractSpec {
    label: "Custom contract",
    point_value: points(1),
}];

static INSTRUMENTS: [Instrument; 6] = [
    Instrument {
        id: InstrumentId::Ger40,
        currency: QuoteCurrency::Eur,
        contract_specs: GER40_SPECS,
        conversion: ConversionMode::FetchedRate { symbol: "EURUSD=X" },
        index_symbol: Some("^GDAXI"),
    },
    Instrument {
        id: InstrumentId::Uk100,
        currency: QuoteCurrency::Gbp,
        contract_specs: UK100_SPECS,
        conversion: ConversionMode::FetchedRate { symbol: "GBPUSD=X" },
        index_symbol: Some("^FTSE"),
    },
    Instrument {
        id: InstrumentId::Us30,
        currency: QuoteCurrency::Usd,
        contract_specs: US30_SPECS,
        conversion: ConversionMode::NoConversion,
        index_symbol: Some("^DJI"),
    },
    Instrument {
        id: InstrumentId::Eu50,
        currency: QuoteCurrency::Eur,
        contract_specs: EU50_SPECS,
        conversion: ConversionMode::FetchedRate { symbol: "EURUSD=X" },
        index_symbol: Some("^STOXX50E"),
    },
    Instrument {
        id: InstrumentId::Aus200,
        currency: QuoteCurrency::Aud,
        contract_specs: AUS200_SPECS,
        conversion: ConversionMode::FetchedRate { symbol: "AUDUSD=X" },
        index_symbol: Some("^AXJO"),
    },
    Instrument {
        id: InstrumentId::Custom,
        currency: QuoteCurrency::Custom,
        contract_specs: CUSTOM_SPECS,
        conversion: ConversionMode::ManualEntry,
        index_symbol: None,
    },
];

/// Read-only registry of every tradable instrument.
///
/// The table is compiled into the binary; there are no mutation operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstrumentCatalog;

impl InstrumentCatalog {
    /// All instruments in display order.
    #[must_use]
    pub fn all() -> &'static [Instrument] {
        &INSTRUMENTS
    }

    /// The instrument selected when nothing else is chosen.
    #[must_use]
    pub fn default_instrument() -> &'static Instrument {
        &INSTRUMENTS[0]
    }

    /// Get the entry for a known identifier.
    #[must_use]
    pub fn get(id: InstrumentId) -> &'static Instrument {
        match id {
            InstrumentId::Ger40 => &INSTRUMENTS[0],
            InstrumentId::Uk100 => &INSTRUMENTS[1],
            InstrumentId::Us30 => &INSTRUMENTS[2],
            InstrumentId::Eu50 => &INSTRUMENTS[3],
            InstrumentId::Aus200 => &INSTRUMENTS[4],
            InstrumentId::Custom => &INSTRUMENTS[5],
        }
    }

    /// Look up an instrument by code (case-insensitive) or display name.
    pub fn lookup(name: &str) -> Result<&'static Instrument, CatalogError> {
        let trimmed = name.trim();
        INSTRUMENTS
            .iter()
            .find(|inst| {
                inst.id.code().eq_ignore_ascii_case(trimmed) || inst.id.display_name() == trimmed
            })
            .ok_or_else(|| CatalogError::NotFound {
                name: name.to_string(),
            })
    }
}
