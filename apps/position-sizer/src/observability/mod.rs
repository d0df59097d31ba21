//! Observability: structured logging and Prometheus metrics.

pub mod logging;
pub mod metrics;

pub use self::logging::{LoggingError, init_logging};
pub use self::metrics::{MetricsError, init_metrics, record_calculation, record_quote_fetch};
