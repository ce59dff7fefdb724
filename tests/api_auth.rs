//! API access tests without a database
//!
//! Owner routes must reject missing or bad tokens before anything else;
//! every database-backed route answers 503 when no pool is configured.

mod common;

use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use chatbox_saas::backend::auth::sessions::create_token;
use common::{spawn_app, FakeDomainStore, TestApp};

fn bearer(app: &TestApp) -> HeaderValue {
    let token = create_token(
        &app.state.config.jwt_secret,
        Uuid::new_v4(),
        "owner@example.com".to_string(),
    )
    .unwrap();
    HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
}

#[tokio::test]
async fn test_signup_without_database() {
    let app = spawn_app(FakeDomainStore::with_domains(&[]));

    let response = app
        .server
        .post("/api/auth/signup")
        .json(&serde_json::json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "password123"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], 503);
}

#[tokio::test]
async fn test_owner_routes_require_token() {
    let app = spawn_app(FakeDomainStore::with_domains(&[]));

    for path in ["/api/auth/me", "/api/usage", "/api/chatboxes"] {
        let response = app.server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{path}");
    }
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let app = spawn_app(FakeDomainStore::with_domains(&[]));

    let response = app
        .server
        .get("/api/chatboxes")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer not.a.token"))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_reaches_handler() {
    let app = spawn_app(FakeDomainStore::with_domains(&[]));
    let auth = bearer(&app);

    let response = app
        .server
        .get("/api/chatboxes")
        .add_header(AUTHORIZATION, auth)
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_lead_capture_is_public() {
    let app = spawn_app(FakeDomainStore::with_domains(&[]));

    let response = app
        .server
        .post(&format!("/api/chatboxes/{}/leads", Uuid::new_v4()))
        .json(&serde_json::json!({ "email": "visitor@example.com" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_lead_listing_requires_token() {
    let app = spawn_app(FakeDomainStore::with_domains(&[]));

    let response = app
        .server
        .get(&format!("/api/chatboxes/{}/leads", Uuid::new_v4()))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_widget_script_without_database() {
    let app = spawn_app(FakeDomainStore::with_domains(&[]));

    let response = app
        .server
        .get(&format!("/widget/{}/embed.js", Uuid::new_v4()))
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = spawn_app(FakeDomainStore::with_domains(&[]));

    let response = app.server.get("/does-not-exist").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
