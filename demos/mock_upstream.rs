//! Stand-in for the weather provider during local development.
//!
//! ```text
//! cargo run --example mock_upstream
//! API_KEY=demo-key BASE_URL=http://127.0.0.1:8081/v1 cargo run
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Json, Router};
use serde_json::json;

const DEMO_KEY: &str = "demo-key";

fn check_key(params: &HashMap<String, String>) -> Result<(), Response> {
    match params.get("key").map(String::as_str) {
        Some(DEMO_KEY) => Ok(()),
        Some(_) => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"code": 2006, "message": "API key is invalid."}})),
        )
            .into_response()),
        None => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"code": 1002, "message": "API key is invalid or not provided."}})),
        )
            .into_response()),
    }
}

async fn search(Query(params): Query<HashMap<String, String>>) -> Response {
    if let Err(rejection) = check_key(&params) {
        return rejection;
    }
    let q = params.get("q").cloned().unwrap_or_default();
    Json(json!([{"id": 1, "name": q, "region": "Demo", "country": "Nowhere"}])).into_response()
}

async fn forecast(Query(params): Query<HashMap<String, String>>) -> Response {
    if let Err(rejection) = check_key(&params) {
        return rejection;
    }
    let q = params.get("q").cloned().unwrap_or_default();
    let days: usize = params.get("days").and_then(|d| d.parse().ok()).unwrap_or(1);
    let forecastday: Vec<_> = (0..days.min(14))
        .map(|i| json!({"day_index": i, "day": {"maxtemp_c": 20.0 + i as f64, "mintemp_c": 10.0}}))
        .collect();

    Json(json!({
        "location": {"name": q},
        "current": {"temp_c": 18.5, "condition": {"text": "Sunny"}},
        "forecast": {"forecastday": forecastday},
        "aqi": params.get("aqi"),
        "alerts": params.get("alerts"),
    }))
    .into_response()
}

#[tokio::main]
async fn main() {
    let app = Router::new()
        .route("/v1/search.json", get(search))
        .route("/v1/forecast.json", get(forecast));

    let addr = SocketAddr::from(([127, 0, 0, 1], 8081));
    println!("Mock weather provider listening on http://{}/v1 (key: {})", addr, DEMO_KEY);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
