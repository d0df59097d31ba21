//! HTTP Controller (Driver Adapter)
//!
//! Axum-based calculator page and REST API that delegate to application use cases.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal::RoundingStrategy;

use crate::application::dto::{
    CalculationResponseDto, InstrumentDto, PositionRequestDto, QuoteSnapshotDto,
};
use crate::application::ports::MarketDataPort;
use crate::application::use_cases::{
    CalculatePositionUseCase, CalculationRequestError, LoadInstrumentUseCase,
};
use crate::domain::instrument::{CatalogError, InstrumentCatalog};

use super::page::CalculatorPage;
use super::request::{CalculatorForm, parse_decimal};
use super::response::{ApiErrorResponse, HealthResponse};

/// Application state shared across handlers.
pub struct AppState<M>
where
    M: MarketDataPort,
{
    /// Use case for loading an instrument with its quotes.
    pub load_instrument: Arc<LoadInstrumentUseCase<M>>,
    /// Use case for sizing a position.
    pub calculate_position: Arc<CalculatePositionUseCase<M>>,
    /// Prometheus handle; `/metrics` answers 404 without one.
    pub metrics: Option<PrometheusHandle>,
    /// Application version.
    pub version: String,
}

impl<M> Clone for AppState<M>
where
    M: MarketDataPort,
{
    fn clone(&self) -> Self {
        Self {
            load_instrument: Arc::clone(&self.load_instrument),
            calculate_position: Arc::clone(&self.calculate_position),
            metrics: self.metrics.clone(),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<M>(state: AppState<M>) -> Router
where
    M: MarketDataPort + 'static,
{
    Router::new()
        .route("/", get(calculator_page))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/api/v1/instruments", get(list_instruments))
        .route("/api/v1/instruments/{code}/quote", get(instrument_quote))
        .route("/api/v1/calculate", post(calculate))
        .with_state(state)
}

/// Calculator page. Every request re-runs lookup, quote fetches and, when
/// asked, the calculation.
async fn calculator_page<M>(
    State(state): State<AppState<M>>,
    Query(form): Query<CalculatorForm>,
) -> Html<String>
where
    M: MarketDataPort,
{
    let instrument = form
        .instrument
        .as_deref()
        .and_then(|name| InstrumentCatalog::lookup(name).ok())
        .unwrap_or_else(InstrumentCatalog::default_instrument);

    let snapshot = state.load_instrument.load(instrument).await;

    let defaults = state.calculate_position.defaults();
    let spec = form
        .spec
        .as_deref()
        .and_then(|label| instrument.contract_spec(label).ok())
        .unwrap_or_else(|| instrument.default_spec());
    let custom_point_value = parse_decimal(form.custom_point_value.as_deref())
        .unwrap_or(defaults.custom_point_value);
    let max_risk = parse_decimal(form.max_risk.as_deref()).unwrap_or(defaults.max_risk);
    let manual_rate = parse_decimal(form.manual_rate.as_deref()).unwrap_or(defaults.manual_rate);

    // New instrument: both prices start at the reference open, in cents
    let (entry, stop) = if form.instrument_changed(instrument.id.code()) {
        let reference = snapshot
            .reference_price
            .or_zero()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        (reference, reference)
    } else {
        (
            parse_decimal(form.entry.as_deref()).unwrap_or_default(),
            parse_decimal(form.stop.as_deref()).unwrap_or_default(),
        )
    };

    let calculation = form.wants_calculation().then(|| {
        let request = PositionRequestDto {
            instrument: instrument.id.code().to_string(),
            contract_spec: Some(spec.label.to_string()),
            custom_point_value: Some(custom_point_value),
            max_risk: Some(max_risk),
            manual_rate: Some(manual_rate),
            entry_price: entry,
            stop_loss_price: stop,
        };
        state
            .calculate_position
            .calculate_with_quote(instrument, &request, snapshot.rate.clone())
    });

    let page = CalculatorPage {
        instrument,
        spec_label: spec.label,
        custom_point_value,
        max_risk,
        manual_rate,
        entry,
        stop,
        rate: &snapshot.rate,
        calculation: calculation.as_ref(),
    };

    Html(page.render())
}

/// Health check endpoint.
async fn health_check<M>(State(state): State<AppState<M>>) -> impl IntoResponse
where
    M: MarketDataPort,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

/// Prometheus exposition endpoint.
async fn metrics<M>(State(state): State<AppState<M>>) -> Response
where
    M: MarketDataPort,
{
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiErrorResponse::new("METRICS_DISABLED", "Metrics are disabled")),
        )
            .into_response(),
    }
}

/// Instrument catalog endpoint.
async fn list_instruments() -> impl IntoResponse {
    let instruments: Vec<InstrumentDto> = InstrumentCatalog::all()
        .iter()
        .map(InstrumentDto::from)
        .collect();
    Json(instruments)
}

/// Rate and reference price for one instrument.
async fn instrument_quote<M>(
    State(state): State<AppState<M>>,
    Path(code): Path<String>,
) -> Response
where
    M: MarketDataPort,
{
    match state.load_instrument.execute(&code).await {
        Ok(snapshot) => (StatusCode::OK, Json(QuoteSnapshotDto::from(&snapshot))).into_response(),
        Err(e) => catalog_error(&e).into_response(),
    }
}

/// Position sizing endpoint.
async fn calculate<M>(
    State(state): State<AppState<M>>,
    Json(request): Json<PositionRequestDto>,
) -> Response
where
    M: MarketDataPort,
{
    match state.calculate_position.execute(&request).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(CalculationResponseDto::from(&outcome)),
        )
            .into_response(),
        Err(CalculationRequestError::Catalog(e)) => catalog_error(&e).into_response(),
        Err(e @ CalculationRequestError::NonPositiveInput { .. }) => (
            StatusCode::BAD_REQUEST,
            Json(ApiErrorResponse::new("INVALID_INPUT", e.to_string())),
        )
            .into_response(),
    }
}

fn catalog_error(error: &CatalogError) -> (StatusCode, Json<ApiErrorResponse>) {
    let (status, code) = match error {
        CatalogError::NotFound { .. } => (StatusCode::NOT_FOUND, "INSTRUMENT_NOT_FOUND"),
        CatalogError::UnknownContractSpec { .. } => {
            (StatusCode::BAD_REQUEST, "UNKNOWN_CONTRACT_SPEC")
        }
    };
    (status, Json(ApiErrorResponse::new(code, error.to_string())))
}
