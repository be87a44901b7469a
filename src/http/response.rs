//! Response handling.
//!
//! # Responsibilities
//! - Relay the provider's JSON body byte-for-byte on success
//! - Relay provider error statuses and bodies unchanged
//! - Collapse transport failures into a 500 with a JSON message
//!
//! # Design Decisions
//! - Locally generated errors use the provider's own
//!   `{"error": {"code", "message"}}` shape so clients parse one format

use std::any::Any;

use axum::body::{Body, Bytes};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::upstream::UpstreamError;

/// Successful upstream body, already checked to be JSON.
#[derive(Debug)]
pub struct UpstreamJson(pub Bytes);

impl IntoResponse for UpstreamJson {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            self.0,
        )
            .into_response()
    }
}

/// Errors a handler can answer with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed query parameters.
    #[error("{0}")]
    BadRequest(String),

    #[error("Not Found")]
    NotFound,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// A handler panicked; no detail is exposed.
    #[error("Internal Server Error")]
    Internal,
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "error": {
                "code": status.as_u16(),
                "message": message,
            }
        })),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => error_body(StatusCode::UNPROCESSABLE_ENTITY, &message),
            ApiError::NotFound => error_body(StatusCode::NOT_FOUND, "Not Found"),
            ApiError::Internal => {
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            ApiError::Upstream(UpstreamError::Status {
                status,
                body,
                content_type,
            }) => {
                tracing::warn!(status = status.as_u16(), "Relaying upstream error");
                let content_type =
                    content_type.unwrap_or_else(|| HeaderValue::from_static("application/json"));
                (status, [(CONTENT_TYPE, content_type)], Body::from(body)).into_response()
            }
            ApiError::Upstream(err) => {
                tracing::error!(error = %err, "Upstream call failed");
                error_body(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
            }
        }
    }
}

/// `CatchPanicLayer` hook.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "Handler panicked");
    ApiError::Internal.into_response()
}
