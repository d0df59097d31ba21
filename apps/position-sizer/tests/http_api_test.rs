//! HTTP API Integration Tests
//!
//! Drives the router end to end with a scripted market data source:
//! HTTP → use cases → quote fetcher → sizer → presenter.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{FixedOffset, TimeZone};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use tower::ServiceExt;

use position_sizer::application::ports::{
    MarketDataError, MarketDataPort, PriceBar, SeriesGranularity,
};
use position_sizer::application::use_cases::{
    CalculatePositionUseCase, CalculatorDefaults, LoadInstrumentUseCase,
};
use position_sizer::domain::sizing::PositionSizer;
use position_sizer::infrastructure::http::{AppState, create_router};

// =============================================================================
// Scripted market data
// =============================================================================

type Script = HashMap<(String, SeriesGranularity), Result<Vec<PriceBar>, MarketDataError>>;

#[derive(Default)]
struct ScriptedMarketData {
    script: Script,
    calls: Mutex<Vec<(String, SeriesGranularity)>>,
}

impl ScriptedMarketData {
    fn with(mut self, symbol: &str, granularity: SeriesGranularity, bars: &[Decimal]) -> Self {
        let bars = bars.iter().map(|price| bar(*price)).collect();
        self.script
            .insert((symbol.to_string(), granularity), Ok(bars));
        self
    }

    fn failing(mut self, symbol: &str, granularity: SeriesGranularity) -> Self {
        self.script.insert(
            (symbol.to_string(), granularity),
            Err(MarketDataError::ConnectionError {
                message: "connection refused".to_string(),
            }),
        );
        self
    }

    fn calls(&self) -> Vec<(String, SeriesGranularity)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketDataPort for ScriptedMarketData {
    async fn price_series(
        &self,
        symbol: &str,
        granularity: SeriesGranularity,
    ) -> Result<Vec<PriceBar>, MarketDataError> {
        self.calls
            .lock()
            .unwrap()
            .push((symbol.to_string(), granularity));
        self.script
            .get(&(symbol.to_string(), granularity))
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

fn bar(price: Decimal) -> PriceBar {
    PriceBar {
        timestamp: FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2026, 3, 2, 15, 42, 0)
            .unwrap(),
        open: price,
        close: price,
    }
}

fn router(market_data: &Arc<ScriptedMarketData>) -> Router {
    create_router(AppState {
        load_instrument: Arc::new(LoadInstrumentUseCase::new(Arc::clone(market_data))),
        calculate_position: Arc::new(CalculatePositionUseCase::new(
            Arc::clone(market_data),
            PositionSizer::default(),
            CalculatorDefaults::default(),
        )),
        metrics: None,
        version: "test".to_string(),
    })
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_calculate(app: Router, body: &Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri("/api/v1/calculate")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
    )
    .await
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

fn decimal_at(value: &Value, pointer: &str) -> Decimal {
    match value.pointer(pointer) {
        Some(Value::String(s)) => Decimal::from_str(s).unwrap(),
        Some(Value::Number(n)) => Decimal::from_str(&n.to_string()).unwrap(),
        other => panic!("no decimal at {pointer}: {other:?}"),
    }
}

// =============================================================================
// Calculation scenarios
// =============================================================================

#[tokio::test]
async fn us30_sizes_without_conversion() {
    let market_data = Arc::new(ScriptedMarketData::default());

    let (status, body) = post_calculate(
        router(&market_data),
        &json!({
            "instrument": "US30",
            "max_risk": "3000",
            "entry_price": "34000",
            "stop_loss_price": "33900"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(decimal_at(&body, "/result/stop_distance"), dec!(100));
    assert_eq!(decimal_at(&body, "/result/value_per_point_usd"), dec!(1));
    assert_eq!(decimal_at(&body, "/result/risk_per_lot_usd"), dec!(100));
    assert_eq!(decimal_at(&body, "/result/recommended_lots"), dec!(30));
    assert_eq!(body["formatted"]["stop_distance"], "100.0");
    assert_eq!(body["formatted"]["risk_per_lot_usd"], "$100.00");
    assert_eq!(body["formatted"]["lots_headline"], "30.00");
    assert_eq!(body["rate_display"]["message"], "1.0 (USD)");
    assert!(market_data.calls().is_empty());
}

#[tokio::test]
async fn ger40_futures_with_live_rate() {
    let market_data = Arc::new(ScriptedMarketData::default().with(
        "EURUSD=X",
        SeriesGranularity::Intraday,
        &[dec!(1.0950), dec!(1.10)],
    ));

    let (status, body) = post_calculate(
        router(&market_data),
        &json!({
            "instrument": "GER40 (DAX)",
            "contract_spec": "Futures (1 pt = 25 EUR)",
            "max_risk": "3000",
            "entry_price": "18000",
            "stop_loss_price": "17950"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rate_status"], "FRESH");
    assert_eq!(body["rate_display"]["tone"], "success");
    assert_eq!(body["rate_display"]["message"], "1.1000 (updated 15:42)");
    assert_eq!(decimal_at(&body, "/exchange_rate"), dec!(1.10));
    assert_eq!(body["formatted"]["value_per_point_usd"], "$27.50");
    assert_eq!(body["formatted"]["risk_per_lot_usd"], "$1375.00");
    assert_eq!(body["formatted"]["lots_headline"], "2.18");
    assert_eq!(
        body["formatted"]["breakdown"][1],
        "Contract value: 25 EUR per point = $27.50 USD per point"
    );
    assert_eq!(
        market_data.calls(),
        vec![("EURUSD=X".to_string(), SeriesGranularity::Intraday)]
    );
}

#[tokio::test]
async fn rate_failure_keeps_default_rate() {
    let market_data = Arc::new(
        ScriptedMarketData::default().failing("GBPUSD=X", SeriesGranularity::Intraday),
    );

    let (status, body) = post_calculate(
        router(&market_data),
        &json!({
            "instrument": "UK100",
            "max_risk": "1000",
            "entry_price": "7500",
            "stop_loss_price": "7480"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rate_status"], "ERROR");
    assert_eq!(body["rate_display"]["message"], "Connection error");
    assert_eq!(decimal_at(&body, "/exchange_rate"), dec!(1));
    assert_eq!(decimal_at(&body, "/result/recommended_lots"), dec!(50));
    // Exactly at the threshold is not oversized
    assert_eq!(body["warnings"], json!([]));
    // No daily retry after an error
    assert_eq!(market_data.calls().len(), 1);
}

#[tokio::test]
async fn non_positive_entry_is_a_warning_not_an_error() {
    let market_data = Arc::new(ScriptedMarketData::default());

    let (status, body) = post_calculate(
        router(&market_data),
        &json!({
            "instrument": "US30",
            "entry_price": "0",
            "stop_loss_price": "100"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], false);
    assert!(body.get("result").is_none());
    assert_eq!(body["warnings"][0]["code"], "INVALID_PRICES");
    assert_eq!(
        body["warnings"][0]["message"],
        "Enter entry and stop-loss prices greater than 0"
    );
}

#[tokio::test]
async fn oversized_result_is_still_returned() {
    let market_data = Arc::new(ScriptedMarketData::default());

    let (status, body) = post_calculate(
        router(&market_data),
        &json!({
            "instrument": "US30",
            "max_risk": "3000",
            "entry_price": "34000",
            "stop_loss_price": "33960"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(decimal_at(&body, "/result/recommended_lots"), dec!(75));
    assert_eq!(body["warnings"][0]["code"], "OVERSIZED_LOTS");
    assert_eq!(body["warnings"][0]["tone"], "error");
}

#[tokio::test]
async fn custom_uses_request_rate_without_fetching() {
    let market_data = Arc::new(ScriptedMarketData::default());

    let (status, body) = post_calculate(
        router(&market_data),
        &json!({
            "instrument": "custom",
            "custom_point_value": "10",
            "manual_rate": "0.65",
            "max_risk": "500",
            "entry_price": "100",
            "stop_loss_price": "98"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rate_display"]["message"], "Manual input");
    assert_eq!(decimal_at(&body, "/result/value_per_point_usd"), dec!(6.5));
    assert_eq!(body["formatted"]["lots_headline"], "38.46");
    assert!(market_data.calls().is_empty());
}

// =============================================================================
// Request errors
// =============================================================================

#[tokio::test]
async fn unknown_instrument_is_not_found() {
    let market_data = Arc::new(ScriptedMarketData::default());

    let (status, body) = post_calculate(
        router(&market_data),
        &json!({
            "instrument": "NAS100",
            "entry_price": "18000",
            "stop_loss_price": "17900"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "INSTRUMENT_NOT_FOUND");
}

#[tokio::test]
async fn non_positive_risk_is_bad_request() {
    let market_data = Arc::new(ScriptedMarketData::default());

    let (status, body) = post_calculate(
        router(&market_data),
        &json!({
            "instrument": "US30",
            "max_risk": "0",
            "entry_price": "34000",
            "stop_loss_price": "33900"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}

// =============================================================================
// Catalog and quotes
// =============================================================================

#[tokio::test]
async fn lists_catalog_in_order() {
    let market_data = Arc::new(ScriptedMarketData::default());

    let (status, body) = get_json(router(&market_data), "/api/v1/instruments").await;

    assert_eq!(status, StatusCode::OK);
    let codes: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, ["GER40", "UK100", "US30", "EU50", "AUS200", "CUSTOM"]);
    assert_eq!(body[0]["conversion"]["mode"], "FETCHED_RATE");
    assert_eq!(body[0]["conversion"]["symbol"], "EURUSD=X");
    assert_eq!(body[2]["conversion"]["mode"], "NO_CONVERSION");
    assert_eq!(body[5]["conversion"]["mode"], "MANUAL_ENTRY");
}

#[tokio::test]
async fn quote_falls_back_to_daily_close() {
    let market_data = Arc::new(
        ScriptedMarketData::default()
            .with("AUDUSD=X", SeriesGranularity::Daily, &[dec!(0.6512)])
            .with("^AXJO", SeriesGranularity::Daily, &[dec!(7790), dec!(7801.5)]),
    );

    let (status, body) = get_json(router(&market_data), "/api/v1/instruments/AUS200/quote").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rate_status"], "STALE");
    assert_eq!(body["rate_display"]["message"], "0.6512 (daily close)");
    assert_eq!(decimal_at(&body, "/default_price"), dec!(7801.5));
    assert_eq!(
        market_data.calls(),
        vec![
            ("AUDUSD=X".to_string(), SeriesGranularity::Intraday),
            ("AUDUSD=X".to_string(), SeriesGranularity::Daily),
            ("^AXJO".to_string(), SeriesGranularity::Daily),
        ]
    );
}

#[tokio::test]
async fn quote_without_data_is_unavailable() {
    let market_data = Arc::new(ScriptedMarketData::default());

    let (status, body) = get_json(router(&market_data), "/api/v1/instruments/EU50/quote").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rate_status"], "UNAVAILABLE");
    assert_eq!(body["rate_display"]["message"], "Rate unavailable");
    assert_eq!(decimal_at(&body, "/default_price"), dec!(0));
}
