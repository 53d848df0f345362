//! Item fixtures and test application setup
//!
//! Every test gets its own in-memory repository seeded with two items, so
//! tests are isolated without any database.

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use itemfeed::backend::items::repository::RepositoryResult;
use itemfeed::backend::items::{InMemoryItemRepository, ItemRepository, RepositoryError};
use itemfeed::backend::realtime::ItemUpdatesPublisher;
use itemfeed::backend::routes::create_router;
use itemfeed::backend::server::{AppState, StreamSettings};
use itemfeed::shared::{Item, SubItem};
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;

pub const FIRST_ITEM_ID: &str = "0b7c8c1e-5a0e-4a4e-9a53-5c3f3b1c0001";
pub const SECOND_ITEM_ID: &str = "0b7c8c1e-5a0e-4a4e-9a53-5c3f3b1c0002";

/// The two records every test starts with
pub fn seed_items() -> Vec<Item> {
    vec![
        Item {
            id: FIRST_ITEM_ID.to_string(),
            name: Some("Name 1".to_string()),
            count: Some(10),
            sub_items: Vec::new(),
        },
        Item {
            id: SECOND_ITEM_ID.to_string(),
            name: Some("Name 2".to_string()),
            count: Some(20),
            sub_items: vec![
                SubItem::new("SubItem 1", dec!(1001)),
                SubItem::new("SubItem 2", dec!(2001)),
            ],
        },
    ]
}

/// Application state over a freshly seeded in-memory repository
pub fn test_state() -> AppState {
    test_state_with_buffer(64)
}

/// Same as [`test_state`] with an explicit per-subscriber buffer
pub fn test_state_with_buffer(buffer: usize) -> AppState {
    AppState::with_settings(
        Arc::new(InMemoryItemRepository::with_items(seed_items())),
        ItemUpdatesPublisher::new(buffer),
        StreamSettings {
            keep_alive: Duration::from_secs(30),
        },
    )
}

/// Repository whose every call fails as if the database were down
pub struct UnavailableItemRepository;

#[async_trait]
impl ItemRepository for UnavailableItemRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Item>> {
        Err(RepositoryError::unavailable("database offline"))
    }
    async fn find_by_id(&self, _id: &str) -> RepositoryResult<Option<Item>> {
        Err(RepositoryError::unavailable("database offline"))
    }
    async fn find_by_name(&self, _name: &str) -> RepositoryResult<Option<Item>> {
        Err(RepositoryError::unavailable("database offline"))
    }
    async fn save(&self, _item: Item) -> RepositoryResult<Item> {
        Err(RepositoryError::unavailable("database offline"))
    }
    async fn replace(&self, _item: Item) -> RepositoryResult<Option<Item>> {
        Err(RepositoryError::unavailable("database offline"))
    }
    async fn delete_by_id(&self, _id: &str) -> RepositoryResult<()> {
        Err(RepositoryError::unavailable("database offline"))
    }
    async fn count(&self) -> RepositoryResult<u64> {
        Err(RepositoryError::unavailable("database offline"))
    }
}

/// Application state whose repository always fails
pub fn unavailable_state() -> AppState {
    AppState::with_settings(
        Arc::new(UnavailableItemRepository),
        ItemUpdatesPublisher::new(64),
        StreamSettings {
            keep_alive: Duration::from_secs(30),
        },
    )
}

/// Router over the given state
pub fn test_app(state: &AppState) -> Router {
    create_router(state.clone())
}

/// axum-test server over the given state
pub fn test_server(state: &AppState) -> TestServer {
    TestServer::new(test_app(state)).expect("Failed to create test server")
}
