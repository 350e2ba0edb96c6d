//! Visit CRUD endpoints
//!
//! Handlers only orchestrate: parse parameters, call the service, wrap the
//! result in the uniform envelope. All failures propagate as `AppError`
//! values to the single classification boundary.

use axum::{extract::State, response::Response};

use crate::{
    error::AppResult,
    models::visit::{CreateVisit, UpdateVisit},
    pagination::{PageParams, PageQuery},
    response,
};

use super::{AuthenticatedUser, Json, Path, Query};

/// List visits with search, sorting and pagination
#[utoipa::path(
    get,
    path = "/visits",
    tag = "visits",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Paginated page of visits"),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid pagination parameter", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_visits(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Response> {
    let params = PageParams::from_query(query)?;
    let page = state.services.visits.list(&params).await?;
    Ok(response::success(page, ""))
}

/// Create a new visit
#[utoipa::path(
    post,
    path = "/visits",
    tag = "visits",
    security(("bearer_auth" = [])),
    request_body = CreateVisit,
    responses(
        (status = 201, description = "Visit created", body = crate::models::visit::VisitResource),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 422, description = "Validation failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_visit(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(payload): Json<CreateVisit>,
) -> AppResult<Response> {
    let visit = state.services.visits.create(payload).await?;
    Ok(response::created(visit, "Visit created successfully"))
}

/// Get a visit by ID
#[utoipa::path(
    get,
    path = "/visits/{id}",
    tag = "visits",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Visit ID")),
    responses(
        (status = 200, description = "Visit details", body = crate::models::visit::VisitResource),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 404, description = "Visit not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_visit(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let visit = state.services.visits.get(id).await?;
    Ok(response::success(visit, ""))
}

/// Update a visit
#[utoipa::path(
    put,
    path = "/visits/{id}",
    tag = "visits",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Visit ID")),
    request_body = UpdateVisit,
    responses(
        (status = 200, description = "Visit updated", body = crate::models::visit::VisitResource),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 404, description = "Visit not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Validation failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_visit(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(changes): Json<UpdateVisit>,
) -> AppResult<Response> {
    let visit = state.services.visits.update(id, changes).await?;
    Ok(response::success(visit, "Visit updated successfully"))
}

/// Soft-delete a visit
#[utoipa::path(
    delete,
    path = "/visits/{id}",
    tag = "visits",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Visit ID")),
    responses(
        (status = 200, description = "Visit soft-deleted"),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 404, description = "Visit not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_visit(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let deleted = state.services.visits.delete(id).await?;
    Ok(response::success(deleted, "Visit deleted successfully"))
}
