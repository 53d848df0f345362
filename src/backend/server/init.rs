/**
 * Server Initialization
 *
 * This module builds the application state and the Axum router.
 *
 * # Initialization Process
 *
 * 1. Select the item repository (PostgreSQL or in-memory)
 * 2. Create the item update publisher with the configured buffer
 * 3. Assemble `AppState`
 * 4. Create and configure the router
 */

use axum::Router;

use crate::backend::realtime::broadcast::ItemUpdatesPublisher;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_repository;
use crate::backend::server::state::{AppState, StreamSettings};
use crate::shared::AppConfig;

/// Build application state from configuration
///
/// The returned state owns the only publisher instance for the process;
/// keep a clone of `state.item_updates` to close it on shutdown.
pub async fn create_state(config: &AppConfig) -> AppState {
    tracing::info!("[Startup] Initializing itemfeed backend server");

    let repository = load_repository(config).await;

    let item_updates = ItemUpdatesPublisher::new(config.subscriber_buffer);
    tracing::info!(
        buffer = item_updates.capacity(),
        "[Startup] Item update publisher initialized"
    );

    AppState::with_settings(
        repository,
        item_updates,
        StreamSettings {
            keep_alive: config.keep_alive(),
        },
    )
}

/// Create and configure the Axum application
pub async fn create_app(config: &AppConfig) -> Router<()> {
    let app_state = create_state(config).await;
    let app = create_router(app_state);
    tracing::info!("[Startup] Router configured");
    app
}
