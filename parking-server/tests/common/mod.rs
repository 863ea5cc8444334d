//! Integration test helpers
//!
//! Each test builds a full router over a fresh SQLite database in a temp
//! directory and drives it with `tower::ServiceExt::oneshot`.

// Not every test binary uses every helper.
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use parking_server::api;
use parking_server::core::{Config, ServerState};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

/// Default admin credentials seeded at startup
pub const ADMIN_EMAIL: &str = "admin@parking.com";
pub const ADMIN_PASSWORD: &str = "admin123";

/// Build a router backed by a fresh database.
///
/// The TempDir must be kept alive for the duration of the test.
pub async fn test_app() -> (Router, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = Config::with_overrides(dir.path().to_string_lossy(), 0);
    let state = ServerState::initialize(&config)
        .await
        .expect("Failed to initialize server state");
    (api::router(state), dir)
}

/// Send a request and return (status, parsed JSON body).
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json_body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json_body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Register a user with sane defaults; returns the response body.
pub async fn register_user(app: &Router, name: &str, email: &str, password: &str) -> Value {
    let (status, body) = request(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": name,
            "address": "42 Test Street",
            "phone": "+1 (555) 123-4567",
            "email": email,
            "password": password,
            "confirm_password": password,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    body
}

/// Log in and return the bearer token.
pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().expect("token missing").to_string()
}

/// Token for the seeded default admin.
pub async fn admin_token(app: &Router) -> String {
    login(app, ADMIN_EMAIL, ADMIN_PASSWORD).await
}

/// Register + login in one step.
pub async fn user_token(app: &Router, name: &str, email: &str) -> String {
    register_user(app, name, email, "secret123").await;
    login(app, email, "secret123").await
}

/// Create a parking lot as admin; returns the lot JSON.
pub async fn create_lot(app: &Router, admin: &str, name: &str, total_spots: i64) -> Value {
    let (status, body) = request(
        app,
        "POST",
        "/api/admin/lots",
        Some(admin),
        Some(json!({
            "name": name,
            "location": "Downtown",
            "total_spots": total_spots,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create_lot failed: {body}");
    body
}

/// First available spot id in a lot.
pub async fn first_available_spot(app: &Router, token: &str, lot_id: i64) -> i64 {
    let (status, body) = request(
        app,
        "GET",
        &format!("/api/lots/{lot_id}/spots?available=true"),
        Some(token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "spot list failed: {body}");
    body.as_array().expect("expected spot array")[0]["id"]
        .as_i64()
        .expect("spot id missing")
}
