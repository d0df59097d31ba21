//! Application Services

mod quote_fetcher;

pub use quote_fetcher::QuoteFetcher;
