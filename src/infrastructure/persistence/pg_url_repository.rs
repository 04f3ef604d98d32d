//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::UrlMapping;
use crate::domain::repositories::{StoreError, UrlRepository};
use crate::utils::db_error::{map_insert_error, map_sqlx_error};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Connection pool settings for [`PgUrlRepository::connect`].
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

/// PostgreSQL repository for URL mappings.
///
/// Every call checks a connection out of the pool and hands it back when the
/// query future completes or is dropped, so no request holds a connection past
/// its own response.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Opens a new connection pool and wraps it in a repository.
    pub async fn connect(database_url: &str, settings: &PoolSettings) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .idle_timeout(settings.idle_timeout)
            .max_lifetime(settings.max_lifetime)
            .connect(database_url)
            .await
            .map_err(map_sqlx_error)?;

        Ok(Self::new(Arc::new(pool)))
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn find_by_original(&self, original: &str) -> Result<Option<UrlMapping>, StoreError> {
        sqlx::query_as::<_, UrlMapping>("SELECT short, original FROM urls WHERE original = $1")
            .bind(original)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)
    }

    async fn find_by_short(&self, short: &str) -> Result<Option<UrlMapping>, StoreError> {
        sqlx::query_as::<_, UrlMapping>("SELECT short, original FROM urls WHERE short = $1")
            .bind(short)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)
    }

    async fn insert(&self, short: &str, original: &str) -> Result<UrlMapping, StoreError> {
        sqlx::query_as::<_, UrlMapping>(
            r#"
            INSERT INTO urls (short, original)
            VALUES ($1, $2)
            RETURNING short, original
            "#,
        )
        .bind(short)
        .bind(original)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| map_insert_error(e, short, original))
    }

    async fn initialize_schema(&self) -> Result<(), StoreError> {
        MIGRATOR
            .run(self.pool.as_ref())
            .await
            .map_err(|e| StoreError::Query(format!("schema migration failed: {e}")))
    }

    async fn count(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)
    }
}
