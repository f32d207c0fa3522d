//! End-to-end tests for the Chirpy API over the in-memory store

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use chirpy_server::app_state::AppState;
use chirpy_server::routes::build_router;
use chirpy_server::store::MemoryStore;

const SECRET: &str = "integration-test-secret";

fn test_app() -> Router {
    build_router(AppState::from_store(Arc::new(MemoryStore::new()), SECRET))
}

fn dev_app() -> Router {
    build_router(
        AppState::from_store(Arc::new(MemoryStore::new()), SECRET).with_platform("dev"),
    )
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn register_and_login(app: &Router, email: &str, password: &str) -> Value {
    let credentials = json!({ "email": email, "password": password });
    let (status, _) = send(app, Method::POST, "/api/users", None, Some(credentials.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(app, Method::POST, "/api/login", None, Some(credentials)).await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn health_check() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_user_hides_password() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({ "email": "walt@breakingbad.com", "password": "04234" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "walt@breakingbad.com");
    assert!(body.get("hashed_password").is_none());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn create_user_rejects_bad_email_and_duplicates() {
    let app = test_app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({ "email": "not-an-email", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let credentials = json!({ "email": "dup@example.com", "password": "pw" });
    let (status, _) = send(&app, Method::POST, "/api/users", None, Some(credentials.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, Method::POST, "/api/users", None, Some(credentials)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_failures_share_one_message() {
    let app = test_app();
    register_and_login(&app, "user@example.com", "right").await;

    let (wrong_status, wrong_body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": "user@example.com", "password": "wrong" })),
    )
    .await;
    let (unknown_status, unknown_body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": "nobody@example.com", "password": "right" })),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn login_refresh_revoke_flow() {
    let app = test_app();
    let login = register_and_login(&app, "jesse@example.com", "pw").await;

    let token = login["token"].as_str().unwrap();
    let refresh_token = login["refresh_token"].as_str().unwrap();
    assert_eq!(refresh_token.len(), 64);
    assert!(login.get("hashed_password").is_none());

    // Refresh tokens are not consumed by use
    for _ in 0..2 {
        let (status, body) = send(&app, Method::POST, "/api/refresh", Some(refresh_token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["token"].as_str().is_some());
    }

    // A session token is not a refresh token
    let (status, _) = send(&app, Method::POST, "/api/refresh", Some(token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::POST, "/api/revoke", Some(refresh_token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Revoking twice is fine
    let (status, _) = send(&app, Method::POST, "/api/revoke", Some(refresh_token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::POST, "/api/refresh", Some(refresh_token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid refresh token");
}

#[tokio::test]
async fn refresh_without_header_is_unauthorized() {
    let app = test_app();

    let (status, _) = send(&app, Method::POST, "/api/refresh", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::POST, "/api/revoke", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_reject_bad_tokens() {
    let app = test_app();
    let chirp = json!({ "body": "hello" });

    let (status, body) = send(&app, Method::POST, "/api/chirps", None, Some(chirp.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, body) = send(&app, Method::POST, "/api/chirps", Some("garbage"), Some(chirp)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn chirp_lifecycle() {
    let app = test_app();
    let author = register_and_login(&app, "author@example.com", "pw").await;
    let other = register_and_login(&app, "other@example.com", "pw").await;
    let author_token = author["token"].as_str().unwrap();
    let other_token = other["token"].as_str().unwrap();

    let (status, chirp) = send(
        &app,
        Method::POST,
        "/api/chirps",
        Some(author_token),
        Some(json!({ "body": "I am the one who knocks" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(chirp["user_id"], author["id"]);

    let uri = format!("/api/chirps/{}", chirp["id"].as_str().unwrap());

    let (status, listed) = send(&app, Method::GET, "/api/chirps", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, fetched) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["body"], "I am the one who knocks");

    let (status, _) = send(&app, Method::DELETE, &uri, Some(other_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(author_token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_user_changes_credentials() {
    let app = test_app();
    let login = register_and_login(&app, "old@example.com", "old_pw").await;
    let token = login["token"].as_str().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/users",
        Some(token),
        Some(json!({ "email": "new@example.com", "password": "new_pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "new@example.com");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": "new@example.com", "password": "new_pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/users",
        None,
        Some(json!({ "email": "x@example.com", "password": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_body_gets_json_error() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).expect("error body should be JSON");
    assert_eq!(body["error"], "Could not decode request");
}

#[tokio::test]
async fn incomplete_body_gets_json_error() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": "walt@breakingbad.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Could not decode request");
}

#[tokio::test]
async fn login_rejects_email_without_at_sign() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": "noat", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email must contain @");
}

#[tokio::test]
async fn admin_reset_is_forbidden_outside_dev() {
    let app = test_app();
    register_and_login(&app, "keep@example.com", "pw").await;

    let (status, _) = send(&app, Method::POST, "/admin/reset", None, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": "keep@example.com", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn admin_reset_wipes_users_in_dev() {
    let app = dev_app();
    let login = register_and_login(&app, "gone@example.com", "pw").await;
    let token = login["token"].as_str().unwrap();
    let refresh_token = login["refresh_token"].as_str().unwrap();
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/chirps",
        Some(token),
        Some(json!({ "body": "soon gone" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, "/admin/reset", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Users reset");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": "gone@example.com", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::POST, "/api/refresh", Some(refresh_token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, listed) = send(&app, Method::GET, "/api/chirps", None, None).await;
    assert!(listed.as_array().unwrap().is_empty());

    // The email is free again
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({ "email": "gone@example.com", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}
