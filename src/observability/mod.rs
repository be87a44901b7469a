//! Observability subsystem.
//!
//! Structured logging through `tracing`. Request IDs set by the HTTP layer
//! appear in `TraceLayer` spans and are forwarded upstream.

pub mod logging;

pub use logging::init_logging;
