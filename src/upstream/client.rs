//! HTTP client for the weather provider.

use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::http::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use reqwest::Client;

use crate::config::{ApiKey, UpstreamConfig};
use crate::upstream::error::{redact_bytes, UpstreamError};
use crate::upstream::Endpoint;

/// Query parameters forwarded with a call, excluding the credential.
pub type QueryParams = Vec<(&'static str, String)>;

/// Single shared client for every upstream call.
///
/// Holds the credential; callers only ever see the relayed body.
#[derive(Clone)]
pub struct WeatherClient {
    http: Client,
    base_url: String,
    api_key: Option<ApiKey>,
}

impl WeatherClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        // 3xx is relayed to the caller, never followed.
        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Full URL for an endpoint, without query string.
    pub fn url_for(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    /// Credential first, then the caller's parameters.
    fn query_for(&self, params: QueryParams) -> QueryParams {
        let mut query = Vec::with_capacity(params.len() + 1);
        if let Some(key) = &self.api_key {
            query.push(("key", key.expose().to_string()));
        }
        query.extend(params);
        query
    }

    /// Issue one GET against `endpoint` and return the JSON body on 2xx.
    pub async fn fetch(
        &self,
        endpoint: Endpoint,
        params: QueryParams,
        request_id: Option<&str>,
    ) -> Result<Bytes, UpstreamError> {
        let started = Instant::now();
        let key = self.api_key.as_ref();

        let mut request = self
            .http
            .get(self.url_for(endpoint))
            .query(&self.query_for(params));
        if let Some(id) = request_id {
            request = request.header("x-request-id", id);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::from_transport(e, key))?;

        let status = response.status();
        let content_type = response.headers().get(CONTENT_TYPE).cloned();
        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::from_transport(e, key))?;

        tracing::debug!(
            endpoint = endpoint.path(),
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Upstream responded"
        );

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status,
                body: redact_bytes(body, key),
                content_type,
            });
        }

        // Success bodies go out untouched.
        serde_json::from_slice::<serde::de::IgnoredAny>(&body)
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        Ok(body)
    }
}
