//! Application error type and its HTTP mapping.
//!
//! Every handler returns `Result<_, AppError>`. The response body always has
//! the shape:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Link not found", "details": {} } }
//! ```
//!
//! | Variant      | Status | `code`             |
//! |--------------|--------|--------------------|
//! | `Validation` | 400    | `validation_error` |
//! | `NotFound`   | 404    | `not_found`        |
//! | `Conflict`   | 409    | `conflict`         |
//! | `Internal`   | 500    | `internal_error`   |
//!
//! Internal errors are logged with their cause; the client only sees a
//! generic message.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Message returned to clients for any [`AppError::Internal`].
const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed URL, code, or request body.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Unknown short code.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Short code already taken.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Unexpected persistence or runtime failure.
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

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
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

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its client-facing payload.
    ///
    /// Internal errors are redacted.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            AppError::Validation { message, details } => ErrorInfo {
                code: "validation_error",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::NotFound { message, details } => ErrorInfo {
                code: "not_found",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::Conflict { message, details } => ErrorInfo {
                code: "conflict",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::Internal { .. } => ErrorInfo {
                code: "internal_error",
                message: INTERNAL_MESSAGE.to_string(),
                details: json!({}),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal { message, details } = &self {
            tracing::error!(%message, %details, "Request failed with internal error");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                "Code already exists",
                json!({ "constraint": db.constraint() }),
            );
        }

        AppError::internal(format!("Database error: {e}"), json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Invalid request", details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request("Invalid request", json!({ "reason": rejection.body_text() }))
    }
}

/// A code segment that cannot be decoded cannot name a stored link.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::not_found("Link not found", json!({ "reason": rejection.body_text() }))
    }
}
