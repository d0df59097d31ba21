//! Data Transfer Objects
//!
//! DTOs for crossing the application boundary.

mod calculation_dto;
mod instrument_dto;

pub use calculation_dto::{CalculationResponseDto, PositionRequestDto, WarningDto};
pub use instrument_dto::{ContractSpecDto, InstrumentDto, QuoteSnapshotDto};
