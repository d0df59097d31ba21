// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::panic
    )
)]

//! Position Sizer - Index CFD Lot Calculator
//!
//! Sizes a leveraged index CFD trade so that a stop-out loses at most a
//! chosen USD amount, using a live quote-currency/USD rate where one exists.
//!
//! # Architecture (Clean Architecture + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure business logic
//!   - `instrument`: Static catalog of indices and contract specs
//!   - `quote`: Rate and reference-price lookup outcomes
//!   - `sizing`: Lot sizing formula and sanity warnings
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `MarketDataPort`
//!   - `services`: `QuoteFetcher` (intraday, then daily fallback)
//!   - `use_cases`: `LoadInstrument`, `CalculatePosition`
//!   - `presenter`, `dto`: Display formatting and API shapes
//!
//! - **Infrastructure**: Adapters
//!   - `marketdata`: Yahoo Finance chart adapter
//!   - `http`: Calculator page and REST API

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// YAML configuration loading and validation.
pub mod config;

/// Logging and metrics setup.
pub mod observability;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::instrument::{Instrument, InstrumentCatalog, InstrumentId};
pub use domain::quote::{QuoteStatus, RateQuote, ReferencePrice};
pub use domain::sizing::{CalculationInput, CalculationResult, PositionSizer, SizingError};

// Application re-exports
pub use application::ports::{MarketDataError, MarketDataPort};
pub use application::use_cases::{CalculatePositionUseCase, LoadInstrumentUseCase};

// Infrastructure re-exports
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::marketdata::YahooChartAdapter;
