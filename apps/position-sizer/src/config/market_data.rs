//! Market data source configuration.

use serde::{Deserialize, Serialize};

/// Yahoo Finance chart API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketDataConfig {
    /// API base URL, without the `/v8/finance/chart` path.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout. Unset leaves the HTTP client's default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            request_timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "https://query1.finance.yahoo.com".to_string()
}

fn default_user_agent() -> String {
    concat!("position-sizer/", env!("CARGO_PKG_VERSION")).to_string()
}
