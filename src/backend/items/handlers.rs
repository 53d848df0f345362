//! Item HTTP Handlers
//!
//! Thin adapters between axum extractors and the [`ItemStore`]. The only
//! handler with side effects beyond the store is `create_item`, which hands
//! the committed record to the update publisher.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use futures_util::TryStreamExt;
use serde::Deserialize;

use super::store::ItemStore;
use crate::backend::error::BackendError;
use crate::backend::realtime::broadcast::ItemUpdatesPublisher;
use crate::shared::{Item, ItemPayload};

/// Query string for `GET /api/v1/items/by-name`
#[derive(Debug, Deserialize)]
pub struct ByNameQuery {
    pub name: String,
}

/// List all items
/// GET /api/v1/items
pub async fn list_items(State(store): State<ItemStore>) -> Result<Json<Vec<Item>>, BackendError> {
    let items: Vec<Item> = store.list_all().try_collect().await?;
    tracing::debug!("[Items] Listing {} items", items.len());
    Ok(Json(items))
}

/// Get one item by id
/// GET /api/v1/items/{id}
pub async fn get_item(
    State(store): State<ItemStore>,
    Path(id): Path<String>,
) -> Result<Json<Item>, BackendError> {
    store
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or(BackendError::NotFound)
}

/// Get the earliest-created item with an exact name
/// GET /api/v1/items/by-name?name=
pub async fn get_item_by_name(
    State(store): State<ItemStore>,
    query: Result<Query<ByNameQuery>, QueryRejection>,
) -> Result<Json<Item>, BackendError> {
    let Query(query) = query?;
    store
        .get_by_name(&query.name)
        .await?
        .map(Json)
        .ok_or(BackendError::NotFound)
}

/// Create an item and broadcast it to stream subscribers
/// POST /api/v1/items
///
/// The broadcast happens only after the store has committed the record.
pub async fn create_item(
    State(store): State<ItemStore>,
    State(publisher): State<ItemUpdatesPublisher>,
    payload: Result<Json<ItemPayload>, JsonRejection>,
) -> Result<Json<Item>, BackendError> {
    let Json(payload) = payload?;
    let item = store.create(payload).await?;

    let delivered = publisher.publish(item.clone());
    tracing::debug!(id = %item.id, delivered, "[Items] Creation broadcast");

    Ok(Json(item))
}

/// Partially update an item
/// PUT /api/v1/items/{id}
pub async fn update_item(
    State(store): State<ItemStore>,
    Path(id): Path<String>,
    payload: Result<Json<ItemPayload>, JsonRejection>,
) -> Result<Json<Item>, BackendError> {
    let Json(payload) = payload?;
    let item = store.update(&id, payload).await?;
    Ok(Json(item))
}

/// Delete an item; succeeds whether or not it existed
/// DELETE /api/v1/items/{id}
pub async fn delete_item(
    State(store): State<ItemStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, BackendError> {
    store.delete_by_id(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
