//! Market data adapters.

mod api_types;
mod yahoo;

pub use yahoo::{YahooAdapterError, YahooChartAdapter};
