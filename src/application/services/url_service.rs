//! URL shortening and resolution service.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;

/// Outcome of a shorten request.
///
/// Creation is idempotent per original URL, and callers need to know which
/// path was taken: the HTTP layer answers `201` for [`Created`] and `200`
/// for [`Existing`], and only the duplicate path exposes the click count.
///
/// [`Created`]: CreateOutcome::Created
/// [`Existing`]: CreateOutcome::Existing
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// A new record was inserted.
    Created(UrlRecord),
    /// A record for this URL already existed and was returned unchanged.
    Existing(UrlRecord),
}

/// Outcome of resolving a short code.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The code is live; redirect to the contained original URL.
    Redirect(String),
    /// No record carries this code.
    NotFound,
    /// A record exists but its expiry lies in the past.
    Expired,
}

/// Service for shortening URLs and resolving short codes.
///
/// Guarantees at most one record per original URL (creation is idempotent)
/// and collision-free short codes via bounded retry against the store.
pub struct UrlService {
    repository: Arc<dyn UrlRepository>,
}

impl UrlService {
    /// Creates a new URL service backed by the given repository.
    pub fn new(repository: Arc<dyn UrlRepository>) -> Self {
        Self { repository }
    }

    /// Shortens a URL, or returns the record that already shortens it.
    ///
    /// # Deduplication
    ///
    /// If a record for the same original URL exists, it is returned as
    /// [`CreateOutcome::Existing`] without touching the store further; in
    /// particular its expiry is not rewritten.
    ///
    /// # Code Generation
    ///
    /// - Generates a cryptographically secure random 7-character code
    /// - Retries up to 10 times on collision before failing
    ///
    /// # Expiry
    ///
    /// `expires_in_days` is counted from now; absent or non-positive values
    /// leave the record permanent. A lifetime whose end does not fit in a
    /// timestamp is rejected, never wrapped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the requested lifetime overflows
    /// the timestamp range, [`AppError::Internal`] when code generation
    /// exhausts its attempts or the store fails, and [`AppError::Conflict`]
    /// when a concurrent insert claims the generated code first.
    pub async fn create_short_url(
        &self,
        original_url: String,
        expires_in_days: Option<i64>,
    ) -> Result<CreateOutcome, AppError> {
        if let Some(existing) = self.repository.find_by_url(&original_url).await? {
            return Ok(CreateOutcome::Existing(existing));
        }

        let expires_at = match expires_in_days.filter(|days| *days > 0) {
            Some(days) => Some(
                Duration::try_days(days)
                    .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
                    .ok_or_else(|| AppError::bad_request("expires_in_days is out of range"))?,
            ),
            None => None,
        };

        let short_code = self.generate_unique_code().await?;

        let new_record = NewUrlRecord {
            original_url: original_url.clone(),
            short_code,
            expires_at,
        };

        match self.repository.create(new_record).await {
            Ok(record) => Ok(CreateOutcome::Created(record)),
            Err(AppError::Conflict(message)) => {
                // Lost the check-then-create race. If the same URL landed
                // first, hand back that record; a code collision propagates.
                match self.repository.find_by_url(&original_url).await? {
                    Some(existing) => {
                        tracing::warn!("create conflict recovered, returning racing record");
                        Ok(CreateOutcome::Existing(existing))
                    }
                    None => Err(AppError::Conflict(message)),
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Retrieves a record by its short code.
    ///
    /// Direct passthrough; applies no expiry check and counts no click.
    pub async fn find_by_short_code(
        &self,
        short_code: &str,
    ) -> Result<Option<UrlRecord>, AppError> {
        self.repository.find_by_code(short_code).await
    }

    /// Resolves a short code for redirecting.
    ///
    /// A live hit counts one click before the URL is handed back; the
    /// increment is awaited so a lost write cannot go unnoticed. Expired
    /// records are reported as [`Resolution::Expired`] and left intact.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store failures.
    pub async fn resolve(&self, short_code: &str) -> Result<Resolution, AppError> {
        let record = match self.find_by_short_code(short_code).await? {
            Some(record) => record,
            None => return Ok(Resolution::NotFound),
        };

        if record.is_expired() {
            return Ok(Resolution::Expired);
        }

        self.repository.increment_clicks(short_code).await?;

        Ok(Resolution::Redirect(record.original_url))
    }

    /// Reports whether the backing store currently answers queries.
    pub async fn store_healthy(&self) -> bool {
        self.repository.health_check().await
    }

    /// Generates a short code not yet present in the store.
    ///
    /// Attempts up to 10 times before failing.
    async fn generate_unique_code(&self) -> Result<String, AppError> {
        const MAX_ATTEMPTS: usize = 10;

        for attempt in 1..=MAX_ATTEMPTS {
            let code = generate_code();

            if self.repository.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }

            tracing::warn!(attempt, "code collision, retrying");
        }

        Err(AppError::internal("Failed to generate unique short code"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;
    use crate::utils::code_generator::CODE_LENGTH;
    use mockall::Sequence;

    fn test_record(id: i64, code: &str, url: &str) -> UrlRecord {
        UrlRecord {
            id,
            original_url: url.to_string(),
            short_code: code.to_string(),
            clicks: 0,
            expires_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_short_url_inserts_new_record() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_url()
            .withf(|url| url == "https://example.com/page")
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_create()
            .withf(|new_record| {
                new_record.original_url == "https://example.com/page"
                    && new_record.short_code.len() == CODE_LENGTH
                    && new_record.expires_at.is_none()
            })
            .times(1)
            .returning(|new_record| {
                Ok(UrlRecord {
                    id: 1,
                    original_url: new_record.original_url,
                    short_code: new_record.short_code,
                    clicks: 0,
                    expires_at: new_record.expires_at,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let service = UrlService::new(Arc::new(mock_repo));

        let outcome = service
            .create_short_url("https://example.com/page".to_string(), None)
            .await
            .unwrap();

        match outcome {
            CreateOutcome::Created(record) => {
                assert_eq!(record.original_url, "https://example.com/page");
                assert_eq!(record.clicks, 0);
            }
            CreateOutcome::Existing(_) => panic!("expected a newly created record"),
        }
    }

    #[tokio::test]
    async fn test_create_short_url_returns_existing_record() {
        let mut mock_repo = MockUrlRepository::new();

        let mut existing = test_record(5, "abc1234", "https://example.com");
        existing.clicks = 7;

        mock_repo
            .expect_find_by_url()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        mock_repo.expect_find_by_code().times(0);
        mock_repo.expect_create().times(0);

        let service = UrlService::new(Arc::new(mock_repo));

        let outcome = service
            .create_short_url("https://example.com".to_string(), None)
            .await
            .unwrap();

        match outcome {
            CreateOutcome::Existing(record) => {
                assert_eq!(record.id, 5);
                assert_eq!(record.short_code, "abc1234");
                assert_eq!(record.clicks, 7);
            }
            CreateOutcome::Created(_) => panic!("expected the existing record"),
        }
    }

    #[tokio::test]
    async fn test_create_short_url_sets_expiry_from_days() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_url()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_create()
            .withf(|new_record| {
                let expires_at = match new_record.expires_at {
                    Some(expires_at) => expires_at,
                    None => return false,
                };
                let days = (expires_at - Utc::now()).num_days();
                (29..=30).contains(&days)
            })
            .times(1)
            .returning(|new_record| {
                Ok(UrlRecord {
                    id: 1,
                    original_url: new_record.original_url,
                    short_code: new_record.short_code,
                    clicks: 0,
                    expires_at: new_record.expires_at,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let service = UrlService::new(Arc::new(mock_repo));

        let outcome = service
            .create_short_url("https://example.com".to_string(), Some(30))
            .await
            .unwrap();

        assert!(matches!(outcome, CreateOutcome::Created(_)));
    }

    #[tokio::test]
    async fn test_create_short_url_ignores_non_positive_expiry() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_url()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_create()
            .withf(|new_record| new_record.expires_at.is_none())
            .times(1)
            .returning(|new_record| {
                Ok(UrlRecord {
                    id: 1,
                    original_url: new_record.original_url,
                    short_code: new_record.short_code,
                    clicks: 0,
                    expires_at: new_record.expires_at,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let service = UrlService::new(Arc::new(mock_repo));

        let outcome = service
            .create_short_url("https://example.com".to_string(), Some(0))
            .await
            .unwrap();

        assert!(matches!(outcome, CreateOutcome::Created(_)));
    }

    #[tokio::test]
    async fn test_create_short_url_rejects_unrepresentable_expiry() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_url()
            .times(2)
            .returning(|_| Ok(None));

        mock_repo.expect_find_by_code().times(0);
        mock_repo.expect_create().times(0);

        let service = UrlService::new(Arc::new(mock_repo));

        // 100M days lands past the maximum timestamp; i64::MAX days does not
        // even fit in a TimeDelta. Both must fail cleanly, not panic.
        for days in [100_000_000, i64::MAX] {
            let result = service
                .create_short_url("https://example.com".to_string(), Some(days))
                .await;

            assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_create_short_url_retries_on_code_collision() {
        let mut mock_repo = MockUrlRepository::new();
        let mut seq = Sequence::new();

        mock_repo
            .expect_find_by_url()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));

        let colliding = test_record(3, "collide", "https://other.com");
        mock_repo
            .expect_find_by_code()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(colliding.clone())));

        mock_repo
            .expect_find_by_code()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));

        mock_repo
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_record| {
                Ok(UrlRecord {
                    id: 4,
                    original_url: new_record.original_url,
                    short_code: new_record.short_code,
                    clicks: 0,
                    expires_at: new_record.expires_at,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let service = UrlService::new(Arc::new(mock_repo));

        let outcome = service
            .create_short_url("https://example.com".to_string(), None)
            .await
            .unwrap();

        assert!(matches!(outcome, CreateOutcome::Created(_)));
    }

    #[tokio::test]
    async fn test_create_short_url_fails_after_exhausted_attempts() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_url()
            .times(1)
            .returning(|_| Ok(None));

        let colliding = test_record(3, "collide", "https://other.com");
        mock_repo
            .expect_find_by_code()
            .times(10)
            .returning(move |_| Ok(Some(colliding.clone())));

        mock_repo.expect_create().times(0);

        let service = UrlService::new(Arc::new(mock_repo));

        let result = service
            .create_short_url("https://example.com".to_string(), None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal(_)));
    }

    #[tokio::test]
    async fn test_create_short_url_recovers_record_inserted_by_racing_request() {
        let mut mock_repo = MockUrlRepository::new();
        let mut seq = Sequence::new();

        mock_repo
            .expect_find_by_url()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));

        mock_repo
            .expect_find_by_code()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));

        mock_repo
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::conflict("urls_original_url_key")));

        let winner = test_record(9, "raced00", "https://example.com");
        mock_repo
            .expect_find_by_url()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(winner.clone())));

        let service = UrlService::new(Arc::new(mock_repo));

        let outcome = service
            .create_short_url("https://example.com".to_string(), None)
            .await
            .unwrap();

        match outcome {
            CreateOutcome::Existing(record) => assert_eq!(record.id, 9),
            CreateOutcome::Created(_) => panic!("expected the racing request's record"),
        }
    }

    #[tokio::test]
    async fn test_create_short_url_propagates_code_conflict() {
        let mut mock_repo = MockUrlRepository::new();
        let mut seq = Sequence::new();

        mock_repo
            .expect_find_by_url()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));

        mock_repo
            .expect_find_by_code()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));

        mock_repo
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::conflict("urls_short_code_key")));

        mock_repo
            .expect_find_by_url()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));

        let service = UrlService::new(Arc::new(mock_repo));

        let result = service
            .create_short_url("https://example.com".to_string(), None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_resolve_redirects_and_counts_click() {
        let mut mock_repo = MockUrlRepository::new();

        let record = test_record(1, "abc1234", "https://example.com/landing");
        mock_repo
            .expect_find_by_code()
            .withf(|code| code == "abc1234")
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));

        mock_repo
            .expect_increment_clicks()
            .withf(|code| code == "abc1234")
            .times(1)
            .returning(|_| Ok(()));

        let service = UrlService::new(Arc::new(mock_repo));

        let resolution = service.resolve("abc1234").await.unwrap();

        assert_eq!(
            resolution,
            Resolution::Redirect("https://example.com/landing".to_string())
        );
    }

    #[tokio::test]
    async fn test_resolve_redirects_before_future_expiry() {
        let mut mock_repo = MockUrlRepository::new();

        let mut record = test_record(1, "abc1234", "https://example.com");
        record.expires_at = Some(Utc::now() + Duration::hours(1));

        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));

        mock_repo
            .expect_increment_clicks()
            .times(1)
            .returning(|_| Ok(()));

        let service = UrlService::new(Arc::new(mock_repo));

        let resolution = service.resolve("abc1234").await.unwrap();

        assert!(matches!(resolution, Resolution::Redirect(_)));
    }

    #[tokio::test]
    async fn test_resolve_reports_unknown_code() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo.expect_increment_clicks().times(0);

        let service = UrlService::new(Arc::new(mock_repo));

        let resolution = service.resolve("zzz9999").await.unwrap();

        assert_eq!(resolution, Resolution::NotFound);
    }

    #[tokio::test]
    async fn test_resolve_reports_expired_code_without_counting() {
        let mut mock_repo = MockUrlRepository::new();

        let mut record = test_record(1, "abc1234", "https://example.com");
        record.expires_at = Some(Utc::now() - Duration::hours(1));

        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));

        mock_repo.expect_increment_clicks().times(0);

        let service = UrlService::new(Arc::new(mock_repo));

        let resolution = service.resolve("abc1234").await.unwrap();

        assert_eq!(resolution, Resolution::Expired);
    }

    #[tokio::test]
    async fn test_store_health_passthrough() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_health_check().times(1).returning(|| false);

        let service = UrlService::new(Arc::new(mock_repo));

        assert!(!service.store_healthy().await);
    }
}
