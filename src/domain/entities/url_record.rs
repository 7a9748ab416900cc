//! URL record entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL record with click accounting and optional expiry.
///
/// Represents the mapping between a short code and the original URL it
/// redirects to. Both `original_url` and `short_code` are unique across all
/// records; the store enforces this with uniqueness constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlRecord {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub clicks: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Returns true if the record has an expiry timestamp strictly in the past.
    ///
    /// Records without `expires_at` never expire. Expiration is evaluated at
    /// read time; expired records stay in the store and remain queryable.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| e < Utc::now())
    }
}

/// Input data for creating a new URL record.
///
/// The short code is generated before the record exists and never changes
/// after creation. `id`, `clicks`, and the timestamps are assigned by the
/// store.
#[derive(Debug, Clone)]
pub struct NewUrlRecord {
    pub original_url: String,
    pub short_code: String,
    pub expires_at: Option<DateTime<Utc>>,
}
