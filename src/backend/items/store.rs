/**
 * Item Store
 *
 * CRUD operations over items, written against the `ItemRepository` trait.
 *
 * # Semantics
 *
 * - Identifiers are assigned here (UUID v4) and never taken from clients.
 * - Lookups report absence as `Ok(None)`, never as an error.
 * - `update` is a read-modify-write partial merge (see `Item::merge`).
 *   Concurrent updates to the same id are last-write-wins. The write only
 *   replaces an existing record, so an update racing a delete reports
 *   `NotFound` instead of recreating the item.
 * - `delete_by_id` is idempotent.
 * - Repository failures are passed through as
 *   `ItemStoreError::Repository`; nothing is retried here.
 */

use futures_util::stream::{self, BoxStream, StreamExt};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use super::repository::{ItemRepository, RepositoryError};
use crate::shared::{Item, ItemPayload};

/// Errors returned by [`ItemStore`] operations
#[derive(Debug, Error)]
pub enum ItemStoreError {
    /// The targeted item does not exist
    #[error("item {id} not found")]
    NotFound { id: String },

    /// The repository call failed
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ItemStoreResult<T> = Result<T, ItemStoreError>;

/// Item CRUD service shared by all handlers
#[derive(Clone)]
pub struct ItemStore {
    repository: Arc<dyn ItemRepository>,
}

impl ItemStore {
    pub fn new(repository: Arc<dyn ItemRepository>) -> Self {
        Self { repository }
    }

    /// Lazily list every stored item in store order
    ///
    /// The repository is not touched until the stream is first polled, and
    /// every call reads afresh.
    pub fn list_all(&self) -> BoxStream<'static, ItemStoreResult<Item>> {
        let repository = self.repository.clone();
        stream::once(async move { repository.find_all().await })
            .flat_map(|result| match result {
                Ok(items) => {
                    stream::iter(items.into_iter().map(Ok::<Item, ItemStoreError>)).left_stream()
                }
                Err(e) => stream::iter(std::iter::once(Err(ItemStoreError::from(e)))).right_stream(),
            })
            .boxed()
    }

    pub async fn get_by_id(&self, id: &str) -> ItemStoreResult<Option<Item>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Earliest-created item with exactly this name
    pub async fn get_by_name(&self, name: &str) -> ItemStoreResult<Option<Item>> {
        Ok(self.repository.find_by_name(name).await?)
    }

    /// Persist a new item under a freshly generated identifier
    pub async fn create(&self, payload: ItemPayload) -> ItemStoreResult<Item> {
        let id = Uuid::new_v4().to_string();
        let item = Item::from_payload(id, payload);
        let saved = self.repository.save(item).await?;
        tracing::info!(id = %saved.id, "[Items] Created item");
        Ok(saved)
    }

    /// Merge `payload` into the stored item and persist the result
    pub async fn update(&self, id: &str, payload: ItemPayload) -> ItemStoreResult<Item> {
        let mut item = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ItemStoreError::NotFound { id: id.to_string() })?;

        item.merge(payload);
        let saved = self
            .repository
            .replace(item)
            .await?
            .ok_or_else(|| ItemStoreError::NotFound { id: id.to_string() })?;
        tracing::info!(id = %saved.id, "[Items] Updated item");
        Ok(saved)
    }

    pub async fn delete_by_id(&self, id: &str) -> ItemStoreResult<()> {
        self.repository.delete_by_id(id).await?;
        tracing::info!(id, "[Items] Deleted item (if present)");
        Ok(())
    }

    pub async fn count(&self) -> ItemStoreResult<u64> {
        Ok(self.repository.count().await?)
    }
}
