//! Application Layer
//!
//! Use cases and port definitions.
//!
//! - `ports`: Interfaces for external systems (`MarketDataPort`)
//! - `services`: `QuoteFetcher`, the rate/reference-price fallback policy
//! - `use_cases`: `LoadInstrumentUseCase`, `CalculatePositionUseCase`
//! - `dto`: Data transfer objects for API boundaries
//! - `presenter`: Display formatting for quotes and results

pub mod dto;
pub mod ports;
pub mod presenter;
pub mod services;
pub mod use_cases;
