//! Route handlers.

use axum::extract::rejection::QueryRejection;
use axum::extract::State;
use axum::http::{HeaderMap, Uri};
use axum::Json;
use serde_json::{json, Value};

use crate::http::request::{last_value_query, request_id, ForecastParams, SearchParams};
use crate::http::response::{ApiError, UpstreamJson};
use crate::http::server::AppState;
use crate::upstream::{Endpoint, QueryParams};

pub const LIVENESS_MESSAGE: &str = "✅ Weather Proxy API running!";

/// `GET /`
pub async fn root() -> Json<Value> {
    Json(json!({ "message": LIVENESS_MESSAGE }))
}

/// `GET /search.json?q=`
pub async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<UpstreamJson, ApiError> {
    let params: SearchParams = last_value_query(&uri).map_err(reject)?;
    forward(&state, Endpoint::Search, params.into_query(), &headers).await
}

/// `GET /forecast.json?q=&days=&aqi=&alerts=`
pub async fn forecast(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<UpstreamJson, ApiError> {
    let params: ForecastParams = last_value_query(&uri).map_err(reject)?;
    forward(&state, Endpoint::Forecast, params.into_query(), &headers).await
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

fn reject(rejection: QueryRejection) -> ApiError {
    tracing::debug!(error = %rejection.body_text(), "Rejected query string");
    ApiError::BadRequest(rejection.body_text())
}

async fn forward(
    state: &AppState,
    endpoint: Endpoint,
    params: QueryParams,
    headers: &HeaderMap,
) -> Result<UpstreamJson, ApiError> {
    let request_id = request_id(headers);
    tracing::debug!(
        request_id = request_id.unwrap_or("unknown"),
        endpoint = endpoint.path(),
        "Forwarding request"
    );

    let body = state.client.fetch(endpoint, params, request_id).await?;
    Ok(UpstreamJson(body))
}
