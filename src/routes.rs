//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`          - Submission form
//! - `POST /`          - Shorten a URL
//! - `GET  /{short}`   - Redirect to the stored URL
//! - `GET  /health`    - Store health check
//! - `/static/*`       - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the form and redirects
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use anyhow::Result;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Rate limit applied to public routes.
#[derive(Debug, Clone, Copy)]
pub struct RateLimit {
    pub per_second: u64,
    pub burst: u32,
}

/// Routes serving the shortener itself, without middleware.
///
/// Integration tests mount this directly; [`app_router`] wraps it with rate
/// limiting.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .merge(web::routes::public_routes())
        .merge(api::routes::redirect_routes())
}

/// Constructs the application router with all routes and middleware.
///
/// # Errors
///
/// Returns an error if the rate limit settings are invalid.
pub fn app_router(state: AppState, limit: RateLimit) -> Result<NormalizePath<Router>> {
    let public = public_routes().layer(rate_limit::layer(limit.per_second, limit.burst)?);

    let router = Router::new()
        .merge(public)
        .merge(api::routes::service_routes())
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer());

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}
