//! CORS response headers.

use axum::http::header::InvalidHeaderValue;
use axum::http::HeaderValue;
use tower_http::cors::{AllowMethods, AllowOrigin, Any, CorsLayer};

/// Build a CORS layer for a single origin, or every origin with `"*"`.
pub fn cors_layer(origin: &str, methods: AllowMethods) -> Result<CorsLayer, InvalidHeaderValue> {
    let allow_origin = if origin == "*" {
        AllowOrigin::any()
    } else {
        AllowOrigin::exact(HeaderValue::from_str(origin)?)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(methods)
        .allow_headers(Any))
}
