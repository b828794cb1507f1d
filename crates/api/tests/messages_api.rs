//! HTTP-level tests for direct messages and conversations.

mod common;

use axum::http::StatusCode;
use common::{expect_json, get_auth, post_json_auth, put_auth, token_for};
use serde_json::json;
use sqlx::PgPool;

async fn send_to(app: axum::Router, receiver_id: i64, content: &str, token: &str) -> i64 {
    let response = post_json_auth(
        app,
        "/api/messages",
        json!({ "receiver_id": receiver_id, "content": content }),
        token,
    )
    .await;
    let json = expect_json(response, StatusCode::CREATED).await;
    json["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_send_message(pool: PgPool) {
    let alice = common::create_user(&pool, "alice").await;
    let bob = common::create_user(&pool, "bob").await;
    let token = token_for(alice.id);
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/messages",
        json!({ "receiver_id": bob.id, "content": "Hi Bob" }),
        &token,
    )
    .await;
    let json = expect_json(response, StatusCode::CREATED).await;
    assert_eq!(json["data"]["sender_id"], alice.id);
    assert_eq!(json["data"]["receiver_id"], bob.id);
    assert_eq!(json["data"]["is_read"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_send_message_rejections(pool: PgPool) {
    let alice = common::create_user(&pool, "alice").await;
    let bob = common::create_user(&pool, "bob").await;
    let token = token_for(alice.id);
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/messages",
        json!({ "receiver_id": bob.id, "content": "   \n" }),
        &token,
    )
    .await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let response = post_json_auth(
        app.clone(),
        "/api/messages",
        json!({ "receiver_id": 999999, "content": "Anyone there?" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json_auth(
        app.clone(),
        "/api/messages",
        json!({ "receiver_id": alice.id, "content": "Note to self" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = common::post_json(
        app,
        "/api/messages",
        json!({ "receiver_id": bob.id, "content": "Hi" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_conversations_and_unread(pool: PgPool) {
    let alice = common::create_user(&pool, "alice").await;
    let bob = common::create_user(&pool, "bob").await;
    let carol = common::create_user(&pool, "carol").await;
    let alice_token = token_for(alice.id);
    let bob_token = token_for(bob.id);
    let carol_token = token_for(carol.id);
    let app = common::build_test_app(pool);

    send_to(app.clone(), bob.id, "Hello Bob", &alice_token).await;
    send_to(app.clone(), alice.id, "Hi from Carol", &carol_token).await;
    let latest = send_to(app.clone(), alice.id, "Hi Alice", &bob_token).await;

    let json = expect_json(
        get_auth(app.clone(), "/api/messages/conversations", &alice_token).await,
        StatusCode::OK,
    )
    .await;
    let conversations = json["data"].as_array().unwrap();
    assert_eq!(conversations.len(), 2);
    assert_eq!(conversations[0]["counterpart_id"], bob.id);
    assert_eq!(conversations[0]["last_message"]["id"], latest);
    assert_eq!(conversations[0]["unread_count"], 1);
    assert_eq!(conversations[1]["counterpart_id"], carol.id);

    let json = expect_json(
        get_auth(app.clone(), "/api/messages/unread-count", &alice_token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"]["count"], 2);

    // Alice's own message to Bob is unread for Bob only.
    let json = expect_json(
        get_auth(app.clone(), "/api/messages/unread-count", &bob_token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"]["count"], 1);

    let json = expect_json(
        get_auth(app.clone(), "/api/messages", &alice_token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);

    let json = expect_json(
        get_auth(
            app,
            &format!("/api/messages/conversation/{}", bob.id),
            &alice_token,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    let thread = json["data"].as_array().unwrap();
    assert_eq!(thread.len(), 2);
    assert_eq!(thread[0]["content"], "Hello Bob");
    assert_eq!(thread[1]["content"], "Hi Alice");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_conversation_with_unknown_user(pool: PgPool) {
    let alice = common::create_user(&pool, "alice").await;
    let token = token_for(alice.id);
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/messages/conversation/999999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_only_receiver_marks_read(pool: PgPool) {
    let alice = common::create_user(&pool, "alice").await;
    let bob = common::create_user(&pool, "bob").await;
    let alice_token = token_for(alice.id);
    let bob_token = token_for(bob.id);
    let app = common::build_test_app(pool);

    let id = send_to(app.clone(), bob.id, "Read me", &alice_token).await;
    let uri = format!("/api/messages/{id}/read");

    let response = put_auth(app.clone(), &uri, &alice_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = expect_json(put_auth(app.clone(), &uri, &bob_token).await, StatusCode::OK).await;
    assert_eq!(json["data"]["is_read"], true);

    let json = expect_json(
        get_auth(app.clone(), "/api/messages/unread-count", &bob_token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"]["count"], 0);

    let response = put_auth(app, "/api/messages/999999/read", &bob_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
