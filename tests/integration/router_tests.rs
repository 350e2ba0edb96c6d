//! Router-level tests
//!
//! These exercise the request-shaping layer (extractor rejections, the
//! unknown-route fallback, bearer enforcement) through the real router with
//! `tower::ServiceExt::oneshot`. The database pool is lazy and never
//! connects, so no test here touches a live store.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use chrono::Utc;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower::ServiceExt;

use visits_server::{
    config::{AppConfig, AuthConfig, DatabaseConfig, LoggingConfig, ServerConfig},
    create_router,
    models::user::Claims,
    repository::Repository,
    services::Services,
    AppState,
};

const MAX_BODY_BYTES: usize = 1024;

fn test_state() -> AppState {
    let config = AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_body_bytes: MAX_BODY_BYTES,
        },
        database: DatabaseConfig::default(),
        auth: AuthConfig::default(),
        logging: LoggingConfig::default(),
    };

    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database.url)
        .expect("Failed to build lazy pool");

    let repository = Repository::new(pool);
    let services = Services::new(repository, config.auth.clone());

    AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    }
}

fn bearer_token(state: &AppState) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: "admin".to_string(),
        user_id: 1,
        exp: now + 3600,
        iat: now,
    };
    claims
        .create_token(&state.config.auth.jwt_secret)
        .expect("Failed to create token")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

#[tokio::test]
async fn unknown_route_renders_error_envelope() {
    let app = create_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/nothing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Route not found");
}

#[tokio::test]
async fn oversized_body_renders_413_envelope() {
    let app = create_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(vec![b'a'; MAX_BODY_BYTES * 2]))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn malformed_json_renders_validation_envelope() {
    let app = create_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["errors"], "body");
}

#[tokio::test]
async fn missing_bearer_renders_401_envelope() {
    let app = create_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/visits")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn garbage_bearer_renders_401_envelope() {
    let app = create_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/visits")
                .header(header::AUTHORIZATION, "Bearer not-a-real-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn non_integer_id_renders_404_envelope() {
    let state = test_state();
    let token = bearer_token(&state);
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/visits/abc")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Route not found");
}

#[tokio::test]
async fn mistyped_query_renders_validation_envelope() {
    let state = test_state();
    let token = bearer_token(&state);
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/visits?per_page=lots")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["errors"], "query");
}

#[tokio::test]
async fn malformed_sort_renders_validation_envelope() {
    let state = test_state();
    let token = bearer_token(&state);
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/visits?sort=name%3B%20DROP")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["errors"], "sort");
}

#[tokio::test]
async fn health_check_needs_no_auth() {
    let app = create_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}
