//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, health, visits};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Visits API",
        version = "1.0.0",
        description = "JWT-authenticated REST API for visit records"
    ),
    servers(
        (url = "/api", description = "API root")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        // Visits
        visits::list_visits,
        visits::create_visit,
        visits::get_visit,
        visits::update_visit,
        visits::delete_visit,
    ),
    components(
        schemas(
            // Auth
            crate::models::user::LoginRequest,
            crate::models::user::UserResource,
            auth::LoginData,
            // Visits
            crate::models::visit::Visit,
            crate::models::visit::CreateVisit,
            crate::models::visit::UpdateVisit,
            crate::models::visit::VisitResource,
            // Health
            health::HealthResponse,
            // Envelopes
            crate::response::MessageBody,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "visits", description = "Visit record management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
