//! Cross-origin policy.
//!
//! The proxy is meant to be called from arbitrary browser front-ends, so every
//! origin, method and header is accepted and credentials are allowed. A
//! literal `*` cannot be combined with credentials, so the request's own
//! values are mirrored back instead.

use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
