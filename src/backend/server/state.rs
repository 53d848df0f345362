/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds:
 * - The item store (CRUD over the configured repository)
 * - The item update publisher, created once per process
 * - Stream settings (keep-alive interval)
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract only the part they
 * need, e.g. `State(store): State<ItemStore>`.
 */

use axum::extract::FromRef;
use std::sync::Arc;
use std::time::Duration;

use crate::backend::items::repository::ItemRepository;
use crate::backend::items::store::ItemStore;
use crate::backend::realtime::broadcast::ItemUpdatesPublisher;
use crate::shared::config::DEFAULT_KEEP_ALIVE_SECS;

/// Settings for the item event stream
#[derive(Debug, Clone, Copy)]
pub struct StreamSettings {
    /// Interval between keep-alive comments on idle connections
    pub keep_alive: Duration,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            keep_alive: Duration::from_secs(DEFAULT_KEEP_ALIVE_SECS),
        }
    }
}

/// Application state shared by every handler
///
/// All fields are cheap to clone: the store and the publisher are both
/// handles around shared inner state.
#[derive(Clone)]
pub struct AppState {
    /// Item CRUD service
    pub item_store: ItemStore,

    /// Broadcast publisher fed by successful item creations
    ///
    /// The same instance is used by the create handler and by every stream
    /// connection.
    pub item_updates: ItemUpdatesPublisher,

    /// Event stream settings
    pub stream_settings: StreamSettings,
}

impl AppState {
    /// Build state from explicit parts
    pub fn with_settings(
        repository: Arc<dyn ItemRepository>,
        item_updates: ItemUpdatesPublisher,
        stream_settings: StreamSettings,
    ) -> Self {
        Self {
            item_store: ItemStore::new(repository),
            item_updates,
            stream_settings,
        }
    }
}

impl FromRef<AppState> for ItemStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.item_store.clone()
    }
}

impl FromRef<AppState> for ItemUpdatesPublisher {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.item_updates.clone()
    }
}

impl FromRef<AppState> for StreamSettings {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.stream_settings
    }
}
