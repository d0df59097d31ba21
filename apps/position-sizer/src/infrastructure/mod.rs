//! Infrastructure Layer
//!
//! Adapters for the market data source and the HTTP surface.

pub mod http;
pub mod marketdata;
