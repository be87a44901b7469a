//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env (dotenvy, optional) + process environment
//! config file (TOML, optional)
//!     → loader.rs (parse, overlay environment)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc to handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow an empty environment
//! - The credential is a redacting newtype, never logged

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ApiKey, ListenerConfig, LogFormat, ObservabilityConfig, ProxyConfig, UpstreamConfig};
