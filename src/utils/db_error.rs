//! Classification of SQLx errors into [`StoreError`] values.

use crate::domain::repositories::StoreError;

/// Primary key constraint on `urls.short`.
pub const SHORT_CONSTRAINT: &str = "urls_pkey";

/// Unique constraint on `urls.original`.
pub const ORIGINAL_CONSTRAINT: &str = "urls_original_key";

fn unique_violation_constraint(e: &sqlx::Error) -> Option<Option<&str>> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    Some(db_err.constraint())
}

/// Maps an error raised by `INSERT INTO urls` for the given row.
///
/// A unique violation without a constraint name is attributed to the short
/// code, since that is the only key the service does not check beforehand.
pub fn map_insert_error(e: sqlx::Error, short: &str, original: &str) -> StoreError {
    match unique_violation_constraint(&e) {
        Some(Some(ORIGINAL_CONSTRAINT)) => StoreError::DuplicateOriginal(original.to_string()),
        Some(_) => StoreError::ShortCodeTaken(short.to_string()),
        None => map_sqlx_error(e),
    }
}

/// Maps a generic SQLx error.
pub fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    let message = e.to_string();

    match e {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StoreError::Unavailable(message),
        _ => StoreError::Query(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_are_unavailable() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolClosed),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn test_other_errors_are_query_failures() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::RowNotFound),
            StoreError::Query(_)
        ));
    }

    #[test]
    fn test_insert_error_without_violation_falls_through() {
        let err = map_insert_error(sqlx::Error::PoolTimedOut, "abcdef", "https://a.com");
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
