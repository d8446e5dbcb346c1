//! Permissive cross-origin response decoration.
//!
//! Every response leaving the relay carries the five headers below. They are
//! only filled in when absent, so a value the upstream chose for the same
//! header name is relayed untouched.

use axum::http::{header, HeaderName, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS, PUT, PATCH, DELETE";
pub const ALLOW_HEADERS: &str = "*";
pub const ALLOW_CREDENTIALS: &str = "true";
/// Preflight cache lifetime: 24 hours.
pub const MAX_AGE: &str = "86400";

/// The cross-origin headers set on every response.
pub fn cors_headers() -> [(HeaderName, HeaderValue); 5] {
    [
        (
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static(ALLOW_CREDENTIALS),
        ),
        (
            header::ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from_static(MAX_AGE),
        ),
    ]
}

/// Wrap a router so all of its responses, error paths included, carry the
/// cross-origin headers.
///
/// `tower_http::cors::CorsLayer` is not used: it refuses a wildcard origin
/// together with credentials, and only answers requests it recognises as
/// real preflights.
pub fn with_cors_headers(router: Router) -> Router {
    cors_headers()
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::if_not_present(name, value))
        })
}
