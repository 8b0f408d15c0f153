//! Tests for the login endpoint and the bearer-token middleware

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower::ServiceExt;

use tinylink::auth::Claims;
use tinylink::config::Config;
use tinylink::database::{init_db, AppState};
use tinylink::route::create_app;

fn test_config(db_path: &str) -> Config {
    Config {
        port: 8080,
        base_url: "http://localhost".to_string(),
        database_url: db_path.to_string(),
        jwt_secret: "test-secret".to_string(),
        login_email: "intern@dacoid.com".to_string(),
        login_password: "Test123".to_string(),
        user_id: "intern123".to_string(),
    }
}

fn setup_test_app() -> (axum::Router, NamedTempFile) {
    let temp_db = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = temp_db.path().to_str().unwrap();
    let db = init_db(db_path).expect("Failed to initialize test database");
    let state = AppState {
        db: Arc::new(db),
        config: Arc::new(test_config(db_path)),
    };
    (create_app(state), temp_db)
}

/// Helper function to parse response body as JSON
async fn response_json(body: Body) -> Value {
    let bytes = body
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();

    serde_json::from_slice(&bytes).expect("Failed to parse JSON")
}

fn login_request(email: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "email": email, "password": password }).to_string(),
        ))
        .unwrap()
}

fn create_request(token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/links/create")
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder
        .body(Body::from(
            json!({ "originalUrl": "https://example.com" }).to_string(),
        ))
        .unwrap()
}

#[tokio::test]
async fn test_login_with_configured_credentials_issues_token() {
    let (app, _temp_db) = setup_test_app();

    let response = app
        .oneshot(login_request("intern@dacoid.com", "Test123"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response.into_body()).await;
    let token = body["token"].as_str().expect("token missing");

    // The token must verify against the same secret and carry the identity
    let claims = Claims::verify(token, "test-secret").expect("token does not verify");
    assert_eq!(claims.email, "intern@dacoid.com");
    assert_eq!(claims.user_id, "intern123");
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let (app, _temp_db) = setup_test_app();

    let response = app
        .oneshot(login_request("intern@dacoid.com", "nope"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response_json(response.into_body()).await;
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_with_unknown_email_is_unauthorized() {
    let (app, _temp_db) = setup_test_app();

    let response = app
        .oneshot(login_request("someone@else.com", "Test123"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_without_header_is_unauthenticated() {
    let (app, _temp_db) = setup_test_app();

    let response = app.oneshot(create_request(None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response_json(response.into_body()).await;
    assert_eq!(body["message"], "Authentication required");
}

#[tokio::test]
async fn test_protected_route_with_garbage_token_is_forbidden() {
    let (app, _temp_db) = setup_test_app();

    let response = app
        .oneshot(create_request(Some("not.a.token")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = response_json(response.into_body()).await;
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_protected_route_rejects_token_signed_with_other_secret() {
    let (app, _temp_db) = setup_test_app();

    let claims = Claims {
        email: "intern@dacoid.com".to_string(),
        user_id: "intern123".to_string(),
    };
    let forged = claims.sign("some-other-secret").unwrap();

    let response = app.oneshot(create_request(Some(&forged))).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_protected_route_rejects_token_without_bearer_prefix() {
    let (app, _temp_db) = setup_test_app();

    let login = app
        .clone()
        .oneshot(login_request("intern@dacoid.com", "Test123"))
        .await
        .unwrap();
    let token = response_json(login.into_body()).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    // A valid token presented without the "Bearer " prefix is still rejected
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/links/create")
                .header("content-type", "application/json")
                .header("Authorization", token)
                .body(Body::from(
                    json!({ "originalUrl": "https://example.com" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_protected_route_accepts_issued_token() {
    let (app, _temp_db) = setup_test_app();

    let login = app
        .clone()
        .oneshot(login_request("intern@dacoid.com", "Test123"))
        .await
        .unwrap();
    let token = response_json(login.into_body()).await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app.oneshot(create_request(Some(&token))).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}
