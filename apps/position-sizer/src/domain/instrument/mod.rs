//! Instrument Catalog Bounded Context
//!
//! An immutable, process-wide table of tradable index instruments. Each entry
//! knows its quote currency, the contract specifications a broker may offer
//! for it, how its currency converts to USD, and which index symbol supplies
//! a reference opening price.

mod catalog;
mod errors;
mod value_objects;

pub use catalog::InstrumentCatalog;
pub use errors::CatalogError;
pub use value_objects::{ContractSpec, ConversionMode, Instrument, InstrumentId, QuoteCurrency};
