//! Handler for the URL shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::create_url::{CreateUrlRequest, ShortUrlResponse};
use crate::application::services::CreateOutcome;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL, or returns the one a URL already has.
///
/// # Endpoint
///
/// `POST /create_short_url`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/page",
///   "expires_in_days": 30  // optional
/// }
/// ```
///
/// # Response
///
/// - **201 Created**: a new record was made; `clicks` is omitted
///
/// ```json
/// {
///   "short_url": "aZ3kF9q",
///   "original_url": "https://example.com/page",
///   "expires_at": null
/// }
/// ```
///
/// - **200 OK**: the URL was already shortened; the existing record is
///   returned unchanged with its current click count
///
/// ```json
/// {
///   "short_url": "aZ3kF9q",
///   "original_url": "https://example.com/page",
///   "clicks": 3,
///   "expires_at": null
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not decodable JSON for this
/// shape, the URL is malformed, or `expires_in_days` is outside
/// `1..=36500`.
pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortUrlResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let outcome = state
        .url_service
        .create_short_url(payload.url, payload.expires_in_days)
        .await?;

    let response = match outcome {
        CreateOutcome::Created(record) => {
            (StatusCode::CREATED, Json(ShortUrlResponse::created(record)))
        }
        CreateOutcome::Existing(record) => {
            (StatusCode::OK, Json(ShortUrlResponse::existing(record)))
        }
    };

    Ok(response)
}
