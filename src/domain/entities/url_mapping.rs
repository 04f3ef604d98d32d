//! Mapping between a short code and the URL it redirects to.

/// A stored short code to original URL mapping.
///
/// Both columns are unique in the store: `short` is the primary key and
/// `original` carries its own unique index.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UrlMapping {
    pub short: String,
    pub original: String,
}

impl UrlMapping {
    /// Creates a new mapping.
    pub fn new(short: impl Into<String>, original: impl Into<String>) -> Self {
        Self {
            short: short.into(),
            original: original.into(),
        }
    }

    /// Path under which the mapping is served, e.g. `/e149be`.
    pub fn short_path(&self) -> String {
        format!("/{}", self.short)
    }
}
