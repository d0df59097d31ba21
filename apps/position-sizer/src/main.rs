//! Position Sizer Binary
//!
//! Serves the calculator page and REST API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin position-sizer
//! ```
//!
//! # Environment Variables
//!
//! - `POSITION_SIZER_CONFIG`: Config file path (default: config.yaml)
//! - `RUST_LOG`: Log filter, overrides `observability.logging.level`

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use position_sizer::application::use_cases::{CalculatePositionUseCase, LoadInstrumentUseCase};
use position_sizer::config::{Config, DEFAULT_CONFIG_PATH, load_config};
use position_sizer::domain::sizing::PositionSizer;
use position_sizer::infrastructure::http::{AppState, create_router};
use position_sizer::infrastructure::marketdata::YahooChartAdapter;
use position_sizer::observability::{init_logging, init_metrics};
use tokio::net::TcpListener;
use tokio::signal;

/// Environment variable naming the config file.
const CONFIG_PATH_ENV: &str = "POSITION_SIZER_CONFIG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let (config, missing_file) = match load_config(Some(&config_path)) {
        Ok(config) => (config, false),
        Err(e) if e.is_missing_file() => (Config::default(), true),
        Err(e) => return Err(e).context("failed to load configuration"),
    };

    init_logging(&config.observability.logging).context("failed to initialize logging")?;

    if missing_file {
        tracing::warn!(path = %config_path, "Config file not found, using defaults");
    }
    log_config(&config_path, &config);

    let metrics = if config.observability.metrics.enabled {
        Some(init_metrics().context("failed to install metrics recorder")?)
    } else {
        None
    };

    let market_data = Arc::new(
        YahooChartAdapter::new(&config.market_data)
            .context("failed to create market data adapter")?,
    );

    let state = AppState {
        load_instrument: Arc::new(LoadInstrumentUseCase::new(Arc::clone(&market_data))),
        calculate_position: Arc::new(CalculatePositionUseCase::new(
            market_data,
            PositionSizer::with_config(config.calculator.sizer()),
            config.calculator.defaults(),
        )),
        metrics,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.http_port)
        .parse()
        .context("invalid server bind address")?;

    tracing::info!(%addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /");
    tracing::info!("  GET  /health");
    tracing::info!("  GET  /metrics");
    tracing::info!("  GET  /api/v1/instruments");
    tracing::info!("  GET  /api/v1/instruments/{{code}}/quote");
    tracing::info!("  POST /api/v1/calculate");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Position sizer stopped");
    Ok(())
}

/// Log the loaded configuration.
fn log_config(path: &str, config: &Config) {
    tracing::info!(
        path,
        http_port = config.server.http_port,
        market_data = %config.market_data.base_url,
        max_risk = %config.calculator.default_max_risk,
        oversize_lot_threshold = %config.calculator.oversize_lot_threshold,
        metrics = config.observability.metrics.enabled,
        "Configuration loaded"
    );
}

/// Load .env file from current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// # Panics
///
/// Panics if signal handlers cannot be installed.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
