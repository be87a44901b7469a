//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, query parameters)
//!     → handlers.rs (liveness, search, forecast)
//!     → upstream client (credential injected)
//!     → response.rs (relay body or translate failure)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{ForecastParams, SearchParams, X_REQUEST_ID};
pub use response::{ApiError, UpstreamJson};
pub use server::{AppState, HttpServer};
