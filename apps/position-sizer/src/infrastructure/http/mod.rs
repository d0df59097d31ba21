//! HTTP adapter.
//!
//! Inbound adapter serving the calculator page and REST endpoints that delegate
//! to application use cases.

mod controller;
mod page;
mod request;
mod response;

pub use controller::{AppState, create_router};
pub use page::{CalculatorPage, escape_html};
pub use request::*;
pub use response::*;
