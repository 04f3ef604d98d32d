//! Submission page route configuration.

use crate::state::AppState;
use crate::web::handlers::{form_handler, shorten_handler};
use axum::{Router, routing::get};

/// Public page routes.
///
/// # Endpoints
///
/// - `GET  /` - Empty submission form
/// - `POST /` - Shorten a URL and show its short path
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/", get(form_handler).post(shorten_handler))
}
