//! Short code creation and lookup service.

use std::sync::Arc;

use crate::domain::entities::UrlMapping;
use crate::domain::repositories::{StoreError, UrlRepository};
use crate::error::AppError;
use crate::utils::code_generator::{is_short_code, short_code};
use serde_json::json;

/// Service for shortening URLs and resolving short codes.
///
/// Holds no per-request state; every call goes straight to the repository.
pub struct UrlService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UrlRepository + ?Sized> UrlService<R> {
    /// Creates a new URL service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns the mapping for `original`, creating it on first submission.
    ///
    /// # Deduplication
    ///
    /// A URL that is already stored is returned as is; resubmitting it writes
    /// nothing. If a concurrent request stores the same URL between the lookup
    /// and the insert, the row written by that request is returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the computed short code already belongs
    /// to a different URL, or on store failures.
    pub async fn shorten(&self, original: &str) -> Result<UrlMapping, AppError> {
        let short = short_code(original);

        if let Some(existing) = self.repository.find_by_original(original).await? {
            return Ok(existing);
        }

        match self.repository.insert(&short, original).await {
            Ok(mapping) => {
                tracing::info!(%short, "stored new mapping");
                Ok(mapping)
            }
            Err(StoreError::DuplicateOriginal(_)) => {
                tracing::debug!(%short, "mapping stored concurrently, reusing it");
                self.repository
                    .find_by_original(original)
                    .await?
                    .ok_or_else(|| {
                        AppError::internal(
                            "Mapping vanished after duplicate insert",
                            json!({ "short": short }),
                        )
                    })
            }
            Err(StoreError::ShortCodeTaken(taken)) => {
                // An identical row written concurrently trips the primary key
                // first; only a different original is a real collision.
                match self.repository.find_by_short(&short).await? {
                    Some(existing) if existing.original == original => {
                        tracing::debug!(%short, "mapping stored concurrently, reusing it");
                        Ok(existing)
                    }
                    _ => Err(StoreError::ShortCodeTaken(taken).into()),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Looks up the mapping for a short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping uses `short`. Codes that
    /// could never have been generated are rejected without a store lookup.
    pub async fn resolve(&self, short: &str) -> Result<UrlMapping, AppError> {
        if !is_short_code(short) {
            return Err(AppError::not_found("URL not found", json!({ "short": short })));
        }

        self.repository
            .find_by_short(short)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "short": short })))
    }

    /// Number of stored mappings.
    pub async fn count(&self) -> Result<i64, AppError> {
        Ok(self.repository.count().await?)
    }

    /// Creates the backing schema if needed.
    pub async fn initialize(&self) -> Result<(), AppError> {
        Ok(self.repository.initialize_schema().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;
    use crate::infrastructure::persistence::MemoryUrlRepository;
    use async_trait::async_trait;
    use mockall::predicate::eq;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn test_shorten_inserts_new_url() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_original()
            .with(eq("https://www.example.com"))
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_insert()
            .withf(|short, original| short == "e149be" && original == "https://www.example.com")
            .times(1)
            .returning(|short, original| Ok(UrlMapping::new(short, original)));

        let service = UrlService::new(Arc::new(mock_repo));

        let mapping = service.shorten("https://www.example.com").await.unwrap();

        assert_eq!(mapping.short, "e149be");
        assert_eq!(mapping.short_path(), "/e149be");
    }

    #[tokio::test]
    async fn test_shorten_existing_url_skips_insert() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_original()
            .times(1)
            .returning(|original| Ok(Some(UrlMapping::new("c984d0", original))));

        mock_repo.expect_insert().times(0);

        let service = UrlService::new(Arc::new(mock_repo));

        let mapping = service.shorten("https://example.com").await.unwrap();
        assert_eq!(mapping.short, "c984d0");
    }

    /// Memory store that lets another writer store the row right after the
    /// first `find_by_original` misses.
    struct RacingRepository {
        inner: MemoryUrlRepository,
        rival: (String, String),
        raced: AtomicBool,
    }

    impl RacingRepository {
        fn new(short: &str, original: &str) -> Self {
            Self {
                inner: MemoryUrlRepository::new(),
                rival: (short.to_string(), original.to_string()),
                raced: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl UrlRepository for RacingRepository {
        async fn find_by_original(&self, original: &str) -> Result<Option<UrlMapping>, StoreError> {
            let found = self.inner.find_by_original(original).await?;

            if !self.raced.swap(true, Ordering::SeqCst) {
                let (short, original) = &self.rival;
                self.inner.insert(short, original).await?;
            }

            Ok(found)
        }

        async fn find_by_short(&self, short: &str) -> Result<Option<UrlMapping>, StoreError> {
            self.inner.find_by_short(short).await
        }

        async fn insert(&self, short: &str, original: &str) -> Result<UrlMapping, StoreError> {
            self.inner.insert(short, original).await
        }

        async fn initialize_schema(&self) -> Result<(), StoreError> {
            self.inner.initialize_schema().await
        }

        async fn count(&self) -> Result<i64, StoreError> {
            self.inner.count().await
        }
    }

    #[tokio::test]
    async fn test_shorten_reuses_row_stored_concurrently() {
        let repo = Arc::new(RacingRepository::new("c984d0", "https://example.com"));
        let service = UrlService::new(repo.clone());

        let mapping = service.shorten("https://example.com").await.unwrap();

        assert_eq!(mapping, UrlMapping::new("c984d0", "https://example.com"));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_shorten_collision_stored_concurrently_still_fails() {
        let repo = Arc::new(RacingRepository::new(
            "ffcead",
            "https://example.com/347",
        ));
        let service = UrlService::new(repo.clone());

        let err = service
            .shorten("https://example.com/1155")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(err.to_string(), "Short code collision");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_identical_submissions_share_one_row() {
        let repo = Arc::new(MemoryUrlRepository::new());
        let service = Arc::new(UrlService::new(repo.clone()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.shorten("https://rust-lang.org").await })
            })
            .collect();

        for handle in handles {
            let mapping = handle.await.unwrap().unwrap();
            assert_eq!(mapping.short, "4a9240");
        }

        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_shorten_short_collision_fails() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_original()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_insert()
            .times(1)
            .returning(|short, _| Err(StoreError::ShortCodeTaken(short.to_string())));

        mock_repo
            .expect_find_by_short()
            .with(eq("ffcead"))
            .times(1)
            .returning(|short| Ok(Some(UrlMapping::new(short, "https://example.com/347"))));

        let service = UrlService::new(Arc::new(mock_repo));

        let result = service.shorten("https://example.com/1155").await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_shorten_propagates_store_failure() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_original()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("pool timed out".to_string())));

        mock_repo.expect_insert().times(0);

        let service = UrlService::new(Arc::new(mock_repo));

        let result = service.shorten("https://example.com").await;
        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_short()
            .with(eq("c984d0"))
            .times(1)
            .returning(|short| Ok(Some(UrlMapping::new(short, "https://example.com"))));

        let service = UrlService::new(Arc::new(mock_repo));

        let mapping = service.resolve("c984d0").await.unwrap();
        assert_eq!(mapping.original, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_short()
            .times(1)
            .returning(|_| Ok(None));

        let service = UrlService::new(Arc::new(mock_repo));

        let err = service.resolve("abcdef").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), "URL not found");
    }

    #[tokio::test]
    async fn test_resolve_malformed_code_skips_store() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo.expect_find_by_short().times(0);

        let service = UrlService::new(Arc::new(mock_repo));

        for code in ["C984D0", "abc", "favicon.ico", "c984d0x"] {
            let err = service.resolve(code).await.unwrap_err();
            assert!(matches!(err, AppError::NotFound { .. }));
        }
    }
}
