//! Submission form page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State};
use validator::Validate;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::dto::shorten::ShortenForm;

/// Template for the submission page.
///
/// Renders `templates/index.html` with:
/// - URL submission form
/// - The short path of the last submission, when there is one
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub short_url: Option<String>,
}

/// Renders the empty submission form.
///
/// # Endpoint
///
/// `GET /`
pub async fn form_handler() -> IndexTemplate {
    IndexTemplate { short_url: None }
}

/// Shortens the submitted URL and re-renders the form with the result.
///
/// # Endpoint
///
/// `POST /` with form field `original`
///
/// # Behavior
///
/// Submitting a URL that is already stored returns its existing short path
/// without writing anything.
///
/// # Errors
///
/// Returns 400 Bad Request if `original` is empty, and 500 if the computed
/// short code already belongs to a different URL.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Form(form): Form<ShortenForm>,
) -> Result<IndexTemplate, AppError> {
    form.validate()?;

    let mapping = state.url_service.shorten(&form.original).await?;

    Ok(IndexTemplate {
        short_url: Some(mapping.short_path()),
    })
}
