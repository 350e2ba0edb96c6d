//! API handlers for the visits REST endpoints

pub mod auth;
pub mod health;
pub mod openapi;
pub mod visits;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{error::AppError, models::user::Claims, AppState};

/// JSON body extractor whose rejections render the standard error envelope
///
/// Oversized bodies surface as 413, malformed or mistyped JSON as 422, both
/// through the classifier instead of axum's plain-text rejections.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

/// Query string extractor whose rejections render the standard error envelope
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

/// Path extractor whose rejections render the standard error envelope; an
/// unparseable path parameter is a route that cannot bind, so it maps to 404
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

/// Fallback for requests matching no route
pub async fn fallback() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

/// Extractor for the authenticated user from a JWT bearer token
///
/// Any failure here is a typed [`AppError::Token`] value; the error
/// classifier renders the 401 envelope before the handler body runs.
pub struct AuthenticatedUser(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Token("Missing authorization header".to_string()))?;

        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Token(
                "Invalid authorization header format".to_string(),
            ));
        }

        let token = &auth_header[7..];

        let claims = Claims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Token(e.to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}
