//! HTTP-level integration tests for the `/users/me` profile endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, get_auth, put_json_auth, seed_user, token_for};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_returns_own_profile_without_hash(pool: PgPool) {
    let user = seed_user(&pool, "jaina@theramore.example", "Jaina").await;
    let app = build_test_app(pool);

    let response = get_auth(&app, "/api/v1/users/me", &token_for(&user)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["email"], "jaina@theramore.example");
    assert_eq!(body["data"]["display_name"], "Jaina");
    assert!(body["data"]["password_hash"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_requires_authentication(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(&app, "/api/v1/users/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_display_name_within_bounds(pool: PgPool) {
    let user = seed_user(&pool, "jaina@theramore.example", "Jaina").await;
    let token = token_for(&user);
    let app = build_test_app(pool);

    let response = put_json_auth(
        &app,
        "/api/v1/users/me",
        &token,
        json!({ "display_name": "  Jaina Proudmoore  " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["display_name"], "Jaina Proudmoore");

    // Too short after trimming.
    let response = put_json_auth(
        &app,
        "/api/v1/users/me",
        &token,
        json!({ "display_name": " aj " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Over the 20-character limit.
    let response = put_json_auth(
        &app,
        "/api/v1/users/me",
        &token,
        json!({ "display_name": "x".repeat(21) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_flag_is_not_settable_through_the_profile(pool: PgPool) {
    let user = seed_user(&pool, "jaina@theramore.example", "Jaina").await;
    let token = token_for(&user);
    let app = build_test_app(pool);

    // The update DTO has no admin field; a smuggled one is ignored.
    let response = put_json_auth(
        &app,
        "/api/v1/users/me",
        &token,
        json!({ "display_name": "Archmage", "is_admin": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["display_name"], "Archmage");
    assert_eq!(body["data"]["is_admin"], false);
}
