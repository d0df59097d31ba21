//! Application Ports
//!
//! Driven (secondary/outbound) ports describing how the application uses
//! external systems.

mod market_data_port;

#[cfg(test)]
pub use market_data_port::MockMarketDataPort;
pub use market_data_port::{MarketDataError, MarketDataPort, PriceBar, SeriesGranularity};
