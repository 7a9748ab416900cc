//! In-memory implementation of the URL repository.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

#[derive(Default)]
struct Inner {
    next_id: i64,
    by_code: HashMap<String, UrlRecord>,
    code_by_url: HashMap<String, String>,
}

/// A repository that keeps all records in process memory.
///
/// Enforces the same uniqueness constraints as the Postgres schema and
/// reports violations with the same [`AppError::Conflict`] shape, so the
/// service layer behaves identically on both backends.
///
/// # Use Cases
///
/// - Development environments without Postgres
/// - Integration tests that exercise the full HTTP stack
///
/// All data is lost on shutdown.
pub struct MemoryUrlRepository {
    inner: RwLock<Inner>,
}

impl MemoryUrlRepository {
    /// Creates an empty in-memory repository.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }
}

impl Default for MemoryUrlRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlRepository for MemoryUrlRepository {
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let mut inner = self.inner.write().await;

        if inner.code_by_url.contains_key(&new_record.original_url) {
            return Err(AppError::conflict(
                "Unique constraint violation: urls_original_url_key",
            ));
        }
        if inner.by_code.contains_key(&new_record.short_code) {
            return Err(AppError::conflict(
                "Unique constraint violation: urls_short_code_key",
            ));
        }

        inner.next_id += 1;
        let now = Utc::now();
        let record = UrlRecord {
            id: inner.next_id,
            original_url: new_record.original_url,
            short_code: new_record.short_code,
            clicks: 0,
            expires_at: new_record.expires_at,
            created_at: now,
            updated_at: now,
        };

        inner
            .code_by_url
            .insert(record.original_url.clone(), record.short_code.clone());
        inner
            .by_code
            .insert(record.short_code.clone(), record.clone());

        Ok(record)
    }

    async fn find_by_url(&self, original_url: &str) -> Result<Option<UrlRecord>, AppError> {
        let inner = self.inner.read().await;

        Ok(inner
            .code_by_url
            .get(original_url)
            .and_then(|code| inner.by_code.get(code))
            .cloned())
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlRecord>, AppError> {
        let inner = self.inner.read().await;

        Ok(inner.by_code.get(short_code).cloned())
    }

    async fn increment_clicks(&self, short_code: &str) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;

        // Unknown codes are a no-op, matching an UPDATE affecting zero rows.
        if let Some(record) = inner.by_code.get_mut(short_code) {
            record.clicks += 1;
            record.updated_at = Utc::now();
        }

        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
