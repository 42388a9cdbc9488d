//! API error types and response conversion.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to HTTP clients.
///
/// Client input errors map to 400 and carry a machine-readable `code`.
/// Script and postcondition failures map to 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No image file provided")]
    MissingFile,

    #[error("Only image files are allowed!")]
    InvalidFileType,

    #[error("File too large")]
    FileTooLarge,

    #[error("{0} parameter is required")]
    MissingParameter(&'static str),

    #[error("Invalid {key} parameter: {reason}")]
    InvalidParameter { key: &'static str, reason: String },

    #[error("{0}")]
    BadRequest(String),

    /// A collaborator script is absent, reported without further detail.
    #[error("{0}")]
    ScriptMissing(String),

    /// An operation failed; `details` carries the underlying message.
    #[error("{error}: {details}")]
    Operation { error: String, details: String },

    /// A whitelabel step failed and later steps were skipped.
    #[error("{error}: {details}")]
    StepFailed {
        error: String,
        step: &'static str,
        details: String,
    },

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn operation(error: impl Into<String>, details: impl Into<String>) -> Self {
        ApiError::Operation {
            error: error.into(),
            details: details.into(),
        }
    }

    /// Creates an Internal error from any error type.
    pub fn internal(e: impl std::fmt::Display) -> Self {
        ApiError::Internal(e.to_string())
    }

    /// Maps multipart reader failures. Body limit rejections are reported as
    /// oversized uploads.
    pub fn from_multipart(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::FileTooLarge
        } else {
            ApiError::BadRequest(e.body_text())
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFile
            | ApiError::InvalidFileType
            | ApiError::FileTooLarge
            | ApiError::MissingParameter(_)
            | ApiError::InvalidParameter { .. }
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::ScriptMissing(_)
            | ApiError::Operation { .. }
            | ApiError::StepFailed { .. }
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable code for client errors.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            ApiError::MissingFile => Some("missing_file"),
            ApiError::InvalidFileType => Some("invalid_file_type"),
            ApiError::FileTooLarge => Some("file_too_large"),
            ApiError::MissingParameter(_) => Some("missing_parameter"),
            ApiError::InvalidParameter { .. } => Some("invalid_parameter"),
            ApiError::BadRequest(_) => Some("bad_request"),
            ApiError::NotFound => Some("not_found"),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    step: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let body = match self {
            ApiError::Operation { error, details } => ErrorResponse {
                error,
                code,
                step: None,
                details: Some(details),
            },
            ApiError::StepFailed {
                error,
                step,
                details,
            } => ErrorResponse {
                error,
                code,
                step: Some(step),
                details: Some(details),
            },
            other => ErrorResponse {
                error: other.to_string(),
                code,
                step: None,
                details: None,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
