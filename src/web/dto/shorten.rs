//! Form payload for URL submission.

use serde::Deserialize;
use validator::Validate;

/// Submitted form data.
///
/// The URL is stored exactly as typed. Only emptiness is rejected; scheme and
/// host are not checked.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenForm {
    #[validate(length(min = 1, message = "URL must not be empty"))]
    pub original: String,
}
