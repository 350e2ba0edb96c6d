//! Visits API Server
//!
//! A JWT-authenticated REST JSON API for managing visit records, with
//! pagination, free-text search and soft delete.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod response;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let max_body_bytes = state.config.server.max_body_bytes;

    // API routes
    let api_routes = Router::new()
        // Authentication
        .route("/auth/login", post(api::auth::login))
        // Visits
        .route("/visits", get(api::visits::list_visits))
        .route("/visits", post(api::visits::create_visit))
        .route("/visits/:id", get(api::visits::get_visit))
        .route("/visits/:id", put(api::visits::update_visit))
        .route("/visits/:id", delete(api::visits::delete_visit))
        .with_state(state.clone());

    // Health checks live outside /api
    let health_routes = Router::new()
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(openapi)
        // Unknown routes still render the standard 404 envelope
        .fallback(api::fallback)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(cors)
}
