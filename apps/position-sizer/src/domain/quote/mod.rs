//! Quote Bounded Context
//!
//! Outcomes of the two advisory lookups made on every render: the
//! quote-currency/USD rate and the index reference (opening) price. Each
//! outcome carries its own discriminant so a failed lookup can never be read
//! as a genuine zero.

mod value_objects;

pub use value_objects::{QuoteStatus, RateQuote, ReferencePrice};
