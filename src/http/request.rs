//! Inbound request parameters and request IDs.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) when the caller sent none
//! - Deserialize the query string of each forwarding route
//! - Turn inbound parameters into the upstream parameter list
//!
//! # Design Decisions
//! - Parameters beyond `q` are passed through unvalidated; the provider
//!   rejects values it does not accept

use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::http::{HeaderMap, HeaderName, Request, Uri};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tower_http::request_id::{MakeRequestId, RequestId};
use url::form_urlencoded;
use uuid::Uuid;

use crate::upstream::QueryParams;

pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

pub const DEFAULT_DAYS: i64 = 14;
pub const DEFAULT_AQI: &str = "yes";
pub const DEFAULT_ALERTS: &str = "no";

/// Assigns a UUID v4 to requests without an `x-request-id`.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        Uuid::new_v4().to_string().parse().ok().map(RequestId::new)
    }
}

/// Read the request ID set by the middleware stack.
pub fn request_id(headers: &HeaderMap) -> Option<&str> {
    headers.get(&X_REQUEST_ID).and_then(|v| v.to_str().ok())
}

/// Decode the query string into `T`. A repeated key keeps its last value.
pub fn last_value_query<T: DeserializeOwned>(uri: &Uri) -> Result<T, QueryRejection> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for (key, value) in form_urlencoded::parse(uri.query().unwrap_or_default().as_bytes()) {
        match pairs.iter_mut().find(|(k, _)| k.as_str() == key) {
            Some(slot) => slot.1 = value.into_owned(),
            None => pairs.push((key.into_owned(), value.into_owned())),
        }
    }

    let rebuilt = form_urlencoded::Serializer::for_suffix(String::from("/?"), 2)
        .extend_pairs(&pairs)
        .finish();
    let rebuilt: Uri = rebuilt.parse().unwrap_or_else(|_| uri.clone());
    Query::<T>::try_from_uri(&rebuilt).map(|Query(params)| params)
}

/// `GET /search.json` query.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

impl SearchParams {
    pub fn into_query(self) -> QueryParams {
        vec![("q", self.q)]
    }
}

/// `GET /forecast.json` query.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastParams {
    pub q: String,
    #[serde(default = "default_days")]
    pub days: i64,
    #[serde(default = "default_aqi")]
    pub aqi: String,
    #[serde(default = "default_alerts")]
    pub alerts: String,
}

fn default_days() -> i64 {
    DEFAULT_DAYS
}

fn default_aqi() -> String {
    DEFAULT_AQI.to_string()
}

fn default_alerts() -> String {
    DEFAULT_ALERTS.to_string()
}

impl ForecastParams {
    pub fn into_query(self) -> QueryParams {
        vec![
            ("q", self.q),
            ("days", self.days.to_string()),
            ("aqi", self.aqi),
            ("alerts", self.alerts),
        ]
    }
}
