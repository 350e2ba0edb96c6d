//! Authentication endpoints

use axum::{extract::State, response::Response};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::user::{LoginRequest, UserResource},
    response,
};

use super::Json;

/// Login response data, embedded in the success envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginData {
    /// Signed JWT bearer token
    pub token: String,
    pub token_type: &'static str,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: UserResource,
}

/// Authenticate with username and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated, returns the JWT and user"),
        (status = 401, description = "Credentials do not match", body = crate::error::ErrorResponse),
        (status = 422, description = "Missing username or password", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Response> {
    request.validate()?;

    let (token, user) = state
        .services
        .auth
        .authenticate(&request.username, &request.password)
        .await?;

    Ok(response::success(
        LoginData {
            token,
            token_type: "bearer",
            expires_in: state.services.auth.expires_in(),
            user: UserResource::from(user),
        },
        "",
    ))
}
