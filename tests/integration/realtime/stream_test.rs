//! Item stream integration tests
//!
//! Opens `GET /api/v1/items/stream` against the router and checks what
//! arrives when items are created, updated and deleted.

use crate::common::{
    open_stream, post_item, test_app, test_server, test_state, test_state_with_buffer,
    unavailable_state,
};
use axum::http::StatusCode;
use crate::common::{FIRST_ITEM_ID, SECOND_ITEM_ID};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn test_stream_delivers_created_item() {
    let state = test_state();
    let app = test_app(&state);
    let mut stream = open_stream(&app).await;

    let created = post_item(&app, json!({"name": "Widget", "count": 3, "subItems": []})).await;

    let received = stream.next_item().await;
    assert_eq!(received, created);
    stream.assert_idle(Duration::from_millis(100)).await;
}

#[tokio::test]
async fn test_stream_preserves_creation_order() {
    let state = test_state();
    let app = test_app(&state);
    let mut stream = open_stream(&app).await;

    let a = post_item(&app, json!({"name": "A"})).await;
    let b = post_item(&app, json!({"name": "B"})).await;

    assert_eq!(stream.next_item().await, a);
    assert_eq!(stream.next_item().await, b);
}

#[tokio::test]
async fn test_every_subscriber_receives_each_item() {
    let state = test_state();
    let app = test_app(&state);
    let mut first = open_stream(&app).await;
    let mut second = open_stream(&app).await;

    let created = post_item(&app, json!({"name": "Shared"})).await;

    assert_eq!(first.next_item().await, created);
    assert_eq!(second.next_item().await, created);
}

#[tokio::test]
async fn test_late_subscriber_misses_earlier_items() {
    let state = test_state();
    let app = test_app(&state);
    let mut early = open_stream(&app).await;

    let a = post_item(&app, json!({"name": "A"})).await;
    let mut late = open_stream(&app).await;
    let b = post_item(&app, json!({"name": "B"})).await;

    assert_eq!(early.next_item().await, a);
    assert_eq!(early.next_item().await, b);
    assert_eq!(late.next_item().await, b);
    late.assert_idle(Duration::from_millis(100)).await;
}

#[tokio::test]
async fn test_disconnect_releases_subscriber() {
    let state = test_state();
    let app = test_app(&state);

    let stream = open_stream(&app).await;
    assert_eq!(state.item_updates.subscriber_count(), 1);

    drop(stream);
    assert_eq!(state.item_updates.subscriber_count(), 0);

    // Creating with nobody listening still succeeds
    let created = post_item(&app, json!({"name": "Unheard"})).await;
    assert_eq!(state.item_store.get_by_id(&created.id).await.unwrap(), Some(created));
}

#[tokio::test]
async fn test_update_and_delete_are_not_streamed() {
    let state = test_state();
    let app = test_app(&state);
    let server = test_server(&state);
    let mut stream = open_stream(&app).await;

    server
        .put(&format!("/api/v1/items/{}", FIRST_ITEM_ID))
        .json(&json!({"name": "Renamed"}))
        .await;
    server.delete(&format!("/api/v1/items/{}", SECOND_ITEM_ID)).await;

    stream.assert_idle(Duration::from_millis(100)).await;
}

#[tokio::test]
async fn test_rejected_create_is_not_streamed() {
    let state = test_state();
    let app = test_app(&state);
    let server = test_server(&state);
    let mut stream = open_stream(&app).await;

    server
        .post("/api/v1/items")
        .json(&json!({"count": "many"}))
        .await
        .assert_status_bad_request();

    stream.assert_idle(Duration::from_millis(100)).await;
}

#[tokio::test]
async fn test_create_failed_by_repository_is_not_streamed() {
    let state = unavailable_state();
    let app = test_app(&state);
    let server = test_server(&state);
    let mut stream = open_stream(&app).await;

    let response = server
        .post("/api/v1/items")
        .json(&json!({"name": "Lost"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], 503);
    stream.assert_idle(Duration::from_millis(100)).await;
    assert_eq!(state.item_updates.subscriber_count(), 1);
}

#[tokio::test]
async fn test_slow_subscriber_loses_oldest_items() {
    let state = test_state_with_buffer(2);
    let app = test_app(&state);
    let mut stream = open_stream(&app).await;

    let _a = post_item(&app, json!({"name": "A"})).await;
    let b = post_item(&app, json!({"name": "B"})).await;
    let c = post_item(&app, json!({"name": "C"})).await;

    assert_eq!(stream.next_item().await, b);
    assert_eq!(stream.next_item().await, c);
}

#[tokio::test]
async fn test_stream_ends_when_publisher_closes() {
    let state = test_state();
    let app = test_app(&state);
    let mut stream = open_stream(&app).await;

    let created = post_item(&app, json!({"name": "Last"})).await;
    state.item_updates.close();

    assert_eq!(stream.next_item().await, created);
    assert_eq!(stream.next_event().await, None);
}
