//! Error types for the visits server

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
///
/// Every failure a handler can produce is classified here; the single
/// `IntoResponse` impl below owns the HTTP status and body formatting, so no
/// handler ever renders an error itself.
#[derive(Error, Debug)]
pub enum AppError {
    /// Credential mismatch during login
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Missing or invalid bearer token
    #[error("Invalid token: {0}")]
    Token(String),

    /// Authenticated but not allowed to perform the action
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Route-bound lookup failure
    #[error("Not found: {0}")]
    NotFound(String),

    /// Field validation failure; only the first failing field is surfaced
    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    /// Request body exceeded the configured size bound
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    /// Name of the first failing field, present on validation errors only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Authentication(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            AppError::Token(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            // The original API surfaced denied actions as 401, not 403
            AppError::Forbidden(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::Validation { field, message } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message, Some(field))
            }
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg, None),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::NOT_FOUND, e.to_string(), None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg, None)
            }
        };

        let body = Json(ErrorResponse {
            status: "error".to_string(),
            message,
            errors,
        });

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    /// Surface only the FIRST failing field and its first message, even when
    /// several fields fail. Field errors come back as a hash map, so the
    /// keys are sorted to keep the surfaced field stable across runs.
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut entries: Vec<_> = field_errors.iter().collect();
        entries.sort_by_key(|(field, _)| **field);

        let (field, message) = entries
            .first()
            .map(|(field, errs)| {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                (field.to_string(), message)
            })
            .unwrap_or_else(|| ("unknown".to_string(), "Validation failed".to_string()));

        AppError::Validation { field, message }
    }
}

impl From<JsonRejection> for AppError {
    /// Route body-extraction failures through the classifier so they render
    /// the standard envelope instead of axum's plain-text rejection.
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(rejection.body_text())
        } else {
            AppError::Validation {
                field: "body".to_string(),
                message: rejection.body_text(),
            }
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation {
            field: "query".to_string(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    /// A path parameter that fails to parse means the route cannot bind
    fn from(_rejection: PathRejection) -> Self {
        AppError::NotFound("Route not found".to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
