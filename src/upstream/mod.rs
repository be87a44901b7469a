//! Upstream weather provider access.
//!
//! # Data Flow
//! ```text
//! handler params
//!     → client.rs (inject credential, GET {base_url}/{endpoint})
//!     → 2xx: JSON-checked body, relayed verbatim
//!     → non-2xx: UpstreamError::Status (status + raw body)
//!     → anything else: transport UpstreamError (URL-stripped message)
//! ```

pub mod client;
pub mod error;

pub use client::{QueryParams, WeatherClient};
pub use error::UpstreamError;

/// Provider endpoints the proxy forwards to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Search,
    Forecast,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Search => "search.json",
            Endpoint::Forecast => "forecast.json",
        }
    }
}
