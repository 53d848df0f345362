//! Item repository interface
//!
//! The item store is written against this trait rather than a concrete
//! storage engine. Implementations must be safe to call concurrently; per
//! record consistency is their responsibility.

use async_trait::async_trait;
use thiserror::Error;

use crate::shared::Item;

/// Failure reported by a repository backend
///
/// Always treated as transient by callers: the operation failed and may be
/// retried by whoever issued it. The store never retries on its own.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database driver error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Backend refused or could not complete the call
    #[error("repository unavailable: {message}")]
    Unavailable { message: String },
}

impl RepositoryError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Async CRUD access to stored items, keyed by identifier
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All items in store order (creation order)
    async fn find_all(&self) -> RepositoryResult<Vec<Item>>;

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Item>>;

    /// Earliest-created item whose name matches exactly
    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Item>>;

    /// Insert or replace the record with `item.id`; used for creation
    async fn save(&self, item: Item) -> RepositoryResult<Item>;

    /// Overwrite an existing record
    ///
    /// Returns `Ok(None)` without writing anything when no record with
    /// `item.id` exists, so a deleted id is never brought back.
    async fn replace(&self, item: Item) -> RepositoryResult<Option<Item>>;

    /// Remove the record if present; absent ids are not an error
    async fn delete_by_id(&self, id: &str) -> RepositoryResult<()>;

    async fn count(&self) -> RepositoryResult<u64>;
}
