//! Bearer token handling on protected routes.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, get, get_auth, token_for};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_token_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/users/me").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert!(json["error"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_header_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let request = Request::builder()
        .uri("/api/dashboard/stats")
        .header("authorization", "Token abc")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_garbage_token_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/messages", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_returns_caller(pool: PgPool) {
    let user = common::create_user(&pool, "someone").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/users/me", &token_for(user.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user.id);
    assert_eq!(json["data"]["username"], "someone");
    assert!(json["data"]["average_rating"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_profile_lookup(pool: PgPool) {
    let viewer = common::create_user(&pool, "viewer").await;
    let other = common::create_user(&pool, "other").await;
    let token = token_for(viewer.id);

    let app = common::build_test_app(pool);
    let response = get_auth(app.clone(), &format!("/api/users/{}", other.id), &token).await;
    let json = common::expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["username"], "other");

    let response = get_auth(app, "/api/users/999999", &token).await;
    let json = common::expect_json(response, StatusCode::NOT_FOUND).await;
    assert_eq!(json["code"], "NOT_FOUND");
}
