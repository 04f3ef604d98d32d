//! Redirect and service route configuration.

use crate::api::handlers::{health_handler, redirect_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Public redirect routes.
///
/// # Endpoints
///
/// - `GET /{short}` - Redirect to the stored URL
pub fn redirect_routes() -> Router<AppState> {
    Router::new().route("/{short}", get(redirect_handler))
}

/// Service endpoints, exempt from rate limiting.
///
/// # Endpoints
///
/// - `GET /health` - Store connectivity report
pub fn service_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
