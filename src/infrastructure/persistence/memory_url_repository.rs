//! In-process implementation of the URL repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::entities::UrlMapping;
use crate::domain::repositories::{StoreError, UrlRepository};

#[derive(Debug, Default)]
struct Tables {
    by_short: HashMap<String, String>,
    by_original: HashMap<String, String>,
}

/// Repository backed by two hash maps behind one lock.
///
/// Both uniqueness constraints are checked and applied under the same write
/// guard, so it rejects the same inserts the `urls` table does. Data lives only
/// as long as the process.
#[derive(Debug, Default)]
pub struct MemoryUrlRepository {
    tables: RwLock<Tables>,
}

impl MemoryUrlRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> StoreError {
        StoreError::Unavailable("memory store lock poisoned".to_string())
    }
}

#[async_trait]
impl UrlRepository for MemoryUrlRepository {
    async fn find_by_original(&self, original: &str) -> Result<Option<UrlMapping>, StoreError> {
        let tables = self.tables.read().map_err(|_| Self::poisoned())?;

        Ok(tables
            .by_original
            .get(original)
            .map(|short| UrlMapping::new(short.clone(), original)))
    }

    async fn find_by_short(&self, short: &str) -> Result<Option<UrlMapping>, StoreError> {
        let tables = self.tables.read().map_err(|_| Self::poisoned())?;

        Ok(tables
            .by_short
            .get(short)
            .map(|original| UrlMapping::new(short, original.clone())))
    }

    async fn insert(&self, short: &str, original: &str) -> Result<UrlMapping, StoreError> {
        let mut tables = self.tables.write().map_err(|_| Self::poisoned())?;

        if tables.by_short.contains_key(short) {
            return Err(StoreError::ShortCodeTaken(short.to_string()));
        }
        if tables.by_original.contains_key(original) {
            return Err(StoreError::DuplicateOriginal(original.to_string()));
        }

        tables
            .by_short
            .insert(short.to_string(), original.to_string());
        tables
            .by_original
            .insert(original.to_string(), short.to_string());

        Ok(UrlMapping::new(short, original))
    }

    async fn initialize_schema(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let tables = self.tables.read().map_err(|_| Self::poisoned())?;
        Ok(tables.by_short.len() as i64)
    }
}
