//! Prometheus metrics for quote lookups and calculations.
//!
//! The recorder is installed once at startup; the returned handle renders
//! the exposition text served at `/metrics`. Without an installed recorder
//! the `record_*` functions are no-ops.
//!
//! # Example
//!
//! ```ignore
//! use position_sizer::observability::init_metrics;
//!
//! let handle = init_metrics()?;
//! record_quote_fetch("rate", "fresh");
//! println!("{}", handle.render());
//! ```

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the global Prometheus recorder.
///
/// # Errors
///
/// Returns an error if a recorder is already installed.
pub fn init_metrics() -> Result<PrometheusHandle, MetricsError> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!("Prometheus metrics recorder installed");

    Ok(handle)
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to install metrics recorder.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

/// Record a quote lookup.
///
/// # Arguments
///
/// * `kind` - `"rate"` or `"reference"`
/// * `status` - Outcome (e.g., `"fresh"`, `"stale"`, `"unavailable"`, `"error"`)
pub fn record_quote_fetch(kind: &str, status: &str) {
    counter!(
        "quote_fetch_total",
        "kind" => kind.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record a calculation request.
///
/// # Arguments
///
/// * `outcome` - `"sized"`, `"oversized"`, `"invalid_prices"` or `"overflow"`
pub fn record_calculation(outcome: &str) {
    counter!("position_calculations_total", "outcome" => outcome.to_string()).increment(1);
}
