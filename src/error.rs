//! Application error type and its HTTP rendering.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

use crate::domain::repositories::StoreError;
use crate::utils::db_error::{ORIGINAL_CONSTRAINT, SHORT_CONSTRAINT};

/// Errors returned by services and handlers.
///
/// Every variant renders as a small HTML page. Only [`AppError::NotFound`] and
/// [`AppError::Validation`] show their message to the client; internal failures
/// are logged with their details and answered with a generic 500 page.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status code this error renders with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::ShortCodeTaken(short) => AppError::internal(
                "Short code collision",
                json!({ "short": short, "constraint": SHORT_CONSTRAINT }),
            ),
            StoreError::DuplicateOriginal(original) => AppError::internal(
                "Original URL already stored",
                json!({ "original": original, "constraint": ORIGINAL_CONSTRAINT }),
            ),
            StoreError::Unavailable(reason) => {
                AppError::internal("Store unavailable", json!({ "reason": reason }))
            }
            StoreError::Query(reason) => {
                AppError::internal("Database error", json!({ "reason": reason }))
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request("Invalid form input", json!({ "fields": e.to_string() }))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::Validation { message, .. } | AppError::NotFound { message, .. } => {
                format!("<h1>{message}</h1>")
            }
            AppError::Internal { message, details } => {
                tracing::error!(%message, %details, "request failed");
                "<h1>Internal Server Error</h1>".to_string()
            }
        };

        (status, Html(body)).into_response()
    }
}
