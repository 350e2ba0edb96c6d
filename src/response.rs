//! Uniform success/error JSON envelopes
//!
//! Success envelopes are built here; error envelopes are owned by the
//! [`crate::error::AppError`] classifier. Builders have no side effects.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Success envelope: `{status, message, data}`
#[derive(Debug, Serialize)]
pub struct SuccessBody<T> {
    pub status: &'static str,
    pub message: String,
    pub data: T,
}

/// Bare message envelope: `{status, message}`, no data key
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageBody {
    pub status: String,
    pub message: String,
}

/// 200 success envelope with data
pub fn success<T: Serialize>(data: T, message: impl Into<String>) -> Response {
    with_status(StatusCode::OK, data, message)
}

/// 201 success envelope with data
pub fn created<T: Serialize>(data: T, message: impl Into<String>) -> Response {
    with_status(StatusCode::CREATED, data, message)
}

/// Success envelope with an explicit status code
pub fn with_status<T: Serialize>(
    status: StatusCode,
    data: T,
    message: impl Into<String>,
) -> Response {
    (
        status,
        Json(SuccessBody {
            status: "ok",
            message: message.into(),
            data,
        }),
    )
        .into_response()
}

/// 200 envelope carrying only a message
pub fn message(message: impl Into<String>) -> Response {
    (
        StatusCode::OK,
        Json(MessageBody {
            status: "ok".to_string(),
            message: message.into(),
        }),
    )
        .into_response()
}
