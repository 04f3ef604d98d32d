//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::UrlService;
use crate::domain::repositories::UrlRepository;

/// Service handles shared by every request.
///
/// Built once at startup from a concrete repository and cloned cheaply into
/// each handler through axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService<dyn UrlRepository>>,
}

impl AppState {
    /// Creates application state backed by the given repository.
    pub fn new(repository: Arc<dyn UrlRepository>) -> Self {
        Self {
            url_service: Arc::new(UrlService::new(repository)),
        }
    }
}
