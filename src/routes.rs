//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /create_short_url` - Shorten a URL, or return the existing code
//! - `GET  /{code}`           - Short URL redirect
//! - `GET  /health`           - Health check
//!
//! All other paths, and known paths hit with the wrong method, answer `404`
//! with a JSON error body.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Origin policy from configuration
//! - **Path normalization** - Trailing slash handling

use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api::handlers::{create_url_handler, health_handler, redirect_handler};
use crate::api::middleware::{cors, tracing};
use crate::error::AppError;
use crate::state::AppState;

/// Constructs the routed application without the outer path normalization.
///
/// Integration tests drive this router directly; [`app_router`] wraps it
/// for serving.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `cors_origin` - allowed CORS origin; `None` or `"*"` permits any origin
pub fn router(state: AppState, cors_origin: Option<&str>) -> Router {
    Router::new()
        .route("/create_short_url", post(create_url_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .fallback(fallback_handler)
        .method_not_allowed_fallback(fallback_handler)
        .with_state(state)
        .layer(cors::layer(cors_origin))
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState, cors_origin: Option<&str>) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, cors_origin))
}

/// Answers every unmatched route or method with the JSON not-found body.
async fn fallback_handler() -> AppError {
    AppError::not_found("Not found")
}
