//! Weather proxy library.
//!
//! Forwards city search and forecast queries to a weather provider,
//! injecting a server-held API key so browser clients never see it.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
