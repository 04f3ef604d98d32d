//! Repository trait for short code to URL mappings.

use crate::domain::entities::UrlMapping;
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by [`UrlRepository`] implementations.
///
/// The two constraint variants tell the caller which uniqueness rule fired,
/// so a lost race on the same original URL can be told apart from a hash
/// prefix collision between two different URLs.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("original URL is already stored: {0}")]
    DuplicateOriginal(String),
    #[error("short code is already taken: {0}")]
    ShortCodeTaken(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store query failed: {0}")]
    Query(String),
}

/// Storage interface for URL mappings.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryUrlRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Finds the mapping for an exact original URL.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] or [`StoreError::Query`] on backend failures.
    async fn find_by_original(&self, original: &str) -> Result<Option<UrlMapping>, StoreError>;

    /// Finds the mapping for a short code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] or [`StoreError::Query`] on backend failures.
    async fn find_by_short(&self, short: &str) -> Result<Option<UrlMapping>, StoreError>;

    /// Persists a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateOriginal`] if `original` is already stored,
    /// or [`StoreError::ShortCodeTaken`] if `short` already belongs to another row.
    async fn insert(&self, short: &str, original: &str) -> Result<UrlMapping, StoreError>;

    /// Creates the backing table if it does not exist yet.
    ///
    /// Safe to call on every process start.
    async fn initialize_schema(&self) -> Result<(), StoreError>;

    /// Counts stored mappings.
    async fn count(&self) -> Result<i64, StoreError>;
}
