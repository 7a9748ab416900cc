//! CORS layer configuration.

use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{Any, CorsLayer};

const METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];
const ALLOWED_HEADERS: [header::HeaderName; 2] = [header::CONTENT_TYPE, header::AUTHORIZATION];
const MAX_AGE: Duration = Duration::from_secs(86_400);

/// Builds the CORS layer from the configured origin.
///
/// A wildcard or absent origin allows any origin without credentials. A
/// specific origin is allowed with credentials; if it doesn't parse as a
/// header value, the layer falls back to the permissive form with a warning.
pub fn layer(origin: Option<&str>) -> CorsLayer {
    if let Some(origin) = origin {
        if origin != "*" {
            match origin.parse::<HeaderValue>() {
                Ok(value) => {
                    return base_layer().allow_origin(value).allow_credentials(true);
                }
                Err(_) => {
                    tracing::warn!("Invalid CORS origin {origin:?}. Allowing any origin.");
                }
            }
        }
    }

    base_layer().allow_origin(Any)
}

fn base_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_methods(METHODS)
        .allow_headers(ALLOWED_HEADERS)
        .expose_headers([header::CONTENT_LENGTH])
        .max_age(MAX_AGE)
}
