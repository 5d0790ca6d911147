//! HTTP-level integration tests for the `/auth` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, post_auth, post_json, seed_user};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_creates_non_admin_account(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/auth/register",
        json!({
            "email": "jaina@theramore.example",
            "password": "frostbolt-rank-14",
            "display_name": "Jaina"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert!(!body["access_token"].as_str().unwrap().is_empty());
    assert!(!body["refresh_token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["display_name"], "Jaina");
    assert_eq!(body["user"]["is_admin"], false);
    assert!(body["user"]["password_hash"].is_null(), "hash must never leak");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_duplicate_email_conflicts(pool: PgPool) {
    seed_user(&pool, "taken@azeroth.example", "First").await;
    let app = build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/auth/register",
        json!({
            "email": "taken@azeroth.example",
            "password": "long-enough-pw",
            "display_name": "Second"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_rejects_bad_input(pool: PgPool) {
    let app = build_test_app(pool);

    // Display name too short (2 chars after trim).
    let response = post_json(
        &app,
        "/api/v1/auth/register",
        json!({
            "email": "ok@azeroth.example",
            "password": "long-enough-pw",
            "display_name": "  ab  "
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Malformed email.
    let response = post_json(
        &app,
        "/api/v1/auth/register",
        json!({
            "email": "not-an-email",
            "password": "long-enough-pw",
            "display_name": "Valid Name"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Password below the minimum length.
    let response = post_json(
        &app,
        "/api/v1/auth/register",
        json!({
            "email": "ok@azeroth.example",
            "password": "short",
            "display_name": "Valid Name"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_with_valid_credentials(pool: PgPool) {
    seed_user(&pool, "uther@lordaeron.example", "Uther").await;
    let app = build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/auth/login",
        json!({ "email": "uther@lordaeron.example", "password": "password123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["user"]["email"], "uther@lordaeron.example");
    assert!(body["expires_in"].as_i64().unwrap() > 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_with_wrong_password_is_unauthorized(pool: PgPool) {
    seed_user(&pool, "uther@lordaeron.example", "Uther").await;
    let app = build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/auth/login",
        json!({ "email": "uther@lordaeron.example", "password": "wrong-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Unknown email gets the same generic answer.
    let response = post_json(
        &app,
        "/api/v1/auth/login",
        json!({ "email": "nobody@lordaeron.example", "password": "password123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Refresh rotation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_rotates_the_token(pool: PgPool) {
    seed_user(&pool, "thrall@orgrimmar.example", "Thrall").await;
    let app = build_test_app(pool);

    let login = post_json(
        &app,
        "/api/v1/auth/login",
        json!({ "email": "thrall@orgrimmar.example", "password": "password123" }),
    )
    .await;
    let login_body = body_json(login).await;
    let refresh_token = login_body["refresh_token"].as_str().unwrap().to_string();

    // First refresh succeeds and returns a new pair.
    let response = post_json(
        &app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = body_json(response).await;
    assert_ne!(refreshed["refresh_token"].as_str(), Some(refresh_token.as_str()));

    // The old token was revoked by the rotation.
    let response = post_json(
        &app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logout_revokes_all_sessions(pool: PgPool) {
    seed_user(&pool, "sylvanas@undercity.example", "Sylvanas").await;
    let app = build_test_app(pool);

    let login = post_json(
        &app,
        "/api/v1/auth/login",
        json!({ "email": "sylvanas@undercity.example", "password": "password123" }),
    )
    .await;
    let login_body = body_json(login).await;
    let access_token = login_body["access_token"].as_str().unwrap().to_string();
    let refresh_token = login_body["refresh_token"].as_str().unwrap().to_string();

    let response = post_auth(&app, "/api/v1/auth/logout", &access_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Refresh token from the revoked session no longer works.
    let response = post_json(
        &app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
