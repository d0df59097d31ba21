//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//!
//! # Bounded Contexts
//!
//! - [`instrument`]: Static instrument catalog (currencies, contract specs, quote symbols)
//! - [`quote`]: Outcomes of rate and reference-price lookups
//! - [`sizing`]: Risk-based lot sizing

pub mod instrument;
pub mod quote;
pub mod sizing;
