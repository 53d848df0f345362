/**
 * API Route Handlers
 *
 * This module wires the item resource and the health probe.
 *
 * # Routes
 *
 * ## Items
 * - `GET /api/v1/items` - List all items
 * - `POST /api/v1/items` - Create an item (broadcast to streams)
 * - `GET /api/v1/items/by-name?name=` - Find an item by exact name
 * - `GET /api/v1/items/stream` - Server-Sent Events feed of created items
 * - `GET /api/v1/items/{id}` - Get an item
 * - `PUT /api/v1/items/{id}` - Partially update an item
 * - `DELETE /api/v1/items/{id}` - Delete an item
 *
 * ## Health
 * - `GET /health` - Liveness plus current stream subscriber count
 */

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::backend::items::handlers::{
    create_item, delete_item, get_item, get_item_by_name, list_items, update_item,
};
use crate::backend::realtime::broadcast::ItemUpdatesPublisher;
use crate::backend::realtime::subscription::handle_item_stream;
use crate::backend::server::state::AppState;

/// Configure item routes
///
/// The static `/by-name` and `/stream` segments take precedence over the
/// `{id}` capture.
pub fn configure_item_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/v1/items", get(list_items).post(create_item))
        .route("/api/v1/items/by-name", get(get_item_by_name))
        .route("/api/v1/items/stream", get(handle_item_stream))
        .route(
            "/api/v1/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
}

/// Configure operational routes
pub fn configure_health_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/health", get(health))
}

/// Liveness probe
/// GET /health
async fn health(State(publisher): State<ItemUpdatesPublisher>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "subscribers": publisher.subscriber_count(),
    }))
}
