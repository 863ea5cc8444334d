//! Registration, login and access-control flows

mod common;

use common::*;
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn register_login_and_me() {
    let (app, _dir) = test_app().await;

    let created = register_user(&app, "John Doe", "john@example.com", "secret123").await;
    assert_eq!(created["name"], "John Doe");
    assert_eq!(created["is_admin"], false);
    assert!(created.get("password_hash").is_none());

    let token = login(&app, "john@example.com", "secret123").await;

    let (status, me) = request(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "john@example.com");
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let (app, _dir) = test_app().await;
    register_user(&app, "John Doe", "john@example.com", "secret123").await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "john@example.com", "password": "wrong-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);

    // Unknown email gets the same answer (no enumeration)
    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "ghost@example.com", "password": "whatever42" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);
}

#[tokio::test]
async fn duplicate_email_rejected() {
    let (app, _dir) = test_app().await;
    register_user(&app, "John Doe", "john@example.com", "secret123").await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Second John",
            "address": "1 Other St",
            "phone": "1234567890",
            "email": "john@example.com",
            "password": "secret456",
            "confirm_password": "secret456",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 8002);
}

#[tokio::test]
async fn register_validates_input() {
    let (app, _dir) = test_app().await;

    // Bad email
    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": "John Doe",
            "address": "42 Test Street",
            "phone": "1234567890",
            "email": "not-an-email",
            "password": "secret123",
            "confirm_password": "secret123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Password mismatch
    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": "John Doe",
            "address": "42 Test Street",
            "phone": "1234567890",
            "email": "john@example.com",
            "password": "secret123",
            "confirm_password": "different",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);

    // Short phone
    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": "John Doe",
            "address": "42 Test Street",
            "phone": "12345",
            "email": "john2@example.com",
            "password": "secret123",
            "confirm_password": "secret123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn protected_routes_require_token() {
    let (app, _dir) = test_app().await;

    let (status, body) = request(&app, "GET", "/api/lots", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let (status, _) = request(&app, "GET", "/api/lots", Some("garbage.token.here"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn default_admin_is_seeded() {
    let (app, _dir) = test_app().await;

    let token = admin_token(&app).await;
    let (status, me) = request(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["is_admin"], true);
}

#[tokio::test]
async fn non_admin_cannot_access_admin_routes() {
    let (app, _dir) = test_app().await;
    let token = user_token(&app, "John Doe", "john@example.com").await;

    for uri in [
        "/api/admin/lots",
        "/api/admin/users",
        "/api/admin/dashboard",
        "/api/admin/reservations",
    ] {
        let (status, body) = request(&app, "GET", uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "expected 403 for {uri}");
        assert_eq!(body["code"], 2003);
    }
}

#[tokio::test]
async fn logout_succeeds() {
    let (app, _dir) = test_app().await;
    let token = user_token(&app, "John Doe", "john@example.com").await;

    let (status, body) = request(&app, "POST", "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
}

#[tokio::test]
async fn health_is_public() {
    let (app, _dir) = test_app().await;

    let (status, body) = request(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], true);
}
