//! Handler for short code redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{short}`
///
/// # Response
///
/// - **307 Temporary Redirect** with `Location` set to the stored URL
/// - **404 Not Found** with body `<h1>URL not found</h1>` for unknown codes
///
/// # Errors
///
/// Returns 500 if the stored URL cannot be carried in a `Location` header
/// (for example, it contains control characters).
pub async fn redirect_handler(
    Path(short): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let mapping = state.url_service.resolve(&short).await?;

    debug!(%short, original = %mapping.original, "redirecting");

    let location = HeaderValue::from_str(&mapping.original).map_err(|e| {
        AppError::internal(
            "Stored URL is not a valid Location header",
            json!({ "short": short, "reason": e.to_string() }),
        )
    })?;

    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]))
}
