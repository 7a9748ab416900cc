//! Repository trait for URL record data access.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for persisting shortened URL records.
///
/// The store is the single source of truth for both uniqueness invariants
/// (one record per `original_url`, one record per `short_code`); the service
/// layer checks before inserting, but only the store's constraints are
/// authoritative under concurrent writers.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryUrlRepository`] - in-memory
///   implementation for tests and infrastructure-free development
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Creates a new URL record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if:
    /// - The original URL already has a record
    /// - The short code is already taken
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Finds a record by the original URL it shortens.
    ///
    /// Used by the create flow to detect duplicate submissions of the same
    /// URL before generating a code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn find_by_url(&self, original_url: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Finds a record by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlRecord))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Atomically adds 1 to the click counter of the matching record.
    ///
    /// The increment happens server-side in the store, never as a
    /// read-modify-write in the service, so concurrent resolves of the same
    /// code cannot lose updates. A missing code is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn increment_clicks(&self, short_code: &str) -> Result<(), AppError>;

    /// Checks if the store backend is reachable.
    ///
    /// Used by the health endpoint to report store status.
    async fn health_check(&self) -> bool;
}
