//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod calculate_position;
mod load_instrument;

pub use calculate_position::{
    CalculatePositionUseCase, CalculationOutcome, CalculationRequestError, CalculatorDefaults,
    SizingOutcome,
};
pub use load_instrument::{InstrumentSnapshot, LoadInstrumentUseCase};
