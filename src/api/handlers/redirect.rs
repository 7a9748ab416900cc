//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::application::services::Resolution;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look up the record by short code
/// 2. Reject expired records
/// 3. Count the click; the increment completes before the redirect is sent
/// 4. Return 301 Moved Permanently with the `Location` header set
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 410 Gone if the record's expiry has passed.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    match state.url_service.resolve(&code).await? {
        Resolution::Redirect(original_url) => Ok((
            StatusCode::MOVED_PERMANENTLY,
            [(header::LOCATION, original_url)],
        )
            .into_response()),
        Resolution::NotFound => Err(AppError::not_found("URL not found")),
        Resolution::Expired => Err(AppError::expired("URL has expired")),
    }
}
