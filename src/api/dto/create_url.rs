//! DTOs for the URL shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::UrlRecord;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    /// The original URL to shorten (must be a valid absolute URL).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Optional lifetime in days, counted from creation time. Capped at 100
    /// years.
    #[validate(range(
        min = 1,
        max = 36500,
        message = "expires_in_days must be between 1 and 36500"
    ))]
    pub expires_in_days: Option<i64>,
}

/// Response describing a shortened URL.
///
/// `short_url` carries the short code. `clicks` is present only when an
/// existing record was returned for an already-shortened URL; fresh records
/// omit it, which is how clients tell the two outcomes apart alongside the
/// status code. `expires_at` is always serialized, `null` for permanent
/// records.
#[derive(Debug, Serialize)]
pub struct ShortUrlResponse {
    pub short_url: String,
    pub original_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clicks: Option<i64>,

    pub expires_at: Option<DateTime<Utc>>,
}

impl ShortUrlResponse {
    /// Response shape for a freshly created record.
    pub fn created(record: UrlRecord) -> Self {
        Self {
            short_url: record.short_code,
            original_url: record.original_url,
            clicks: None,
            expires_at: record.expires_at,
        }
    }

    /// Response shape for a pre-existing record, exposing its click count.
    pub fn existing(record: UrlRecord) -> Self {
        Self {
            short_url: record.short_code,
            original_url: record.original_url,
            clicks: Some(record.clicks),
            expires_at: record.expires_at,
        }
    }
}
