//! Tower middleware applied to every route.

pub mod cors;

pub use cors::cors_layer;
