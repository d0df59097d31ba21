//! Instrument catalog errors.

use thiserror::Error;

/// Errors raised by catalog lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Name is neither an instrument code nor a display name.
    #[error("Instrument not found: {name}")]
    NotFound {
        /// The name that was looked up.
        name: String,
    },

    /// Label does not belong to the instrument's contract specs.
    #[error("Unknown contract spec '{label}' for {instrument}")]
    UnknownContractSpec {
        /// Instrument code.
        instrument: String,
        /// The label that was looked up.
        label: String,
    },
}
