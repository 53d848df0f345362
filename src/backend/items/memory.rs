/**
 * In-Memory Item Repository
 *
 * Keeps items in a `HashMap` behind a tokio `RwLock`. Each record remembers
 * the sequence number it was first inserted with, which defines store order
 * for `find_all` and the tie-break for `find_by_name`. Re-saving or
 * replacing an existing id keeps its first position.
 *
 * Used when no database is configured and throughout the tests.
 */

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::repository::{ItemRepository, RepositoryResult};
use crate::shared::Item;

struct Record {
    seq: u64,
    item: Item,
}

#[derive(Default)]
struct Inner {
    records: HashMap<String, Record>,
    next_seq: u64,
}

/// Volatile repository; contents are lost on restart
#[derive(Default)]
pub struct InMemoryItemRepository {
    inner: RwLock<Inner>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository pre-filled with `items`, in order
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut inner = Inner::default();
        for item in items {
            let seq = inner.next_seq;
            inner.next_seq += 1;
            inner.records.insert(item.id.clone(), Record { seq, item });
        }
        Self {
            inner: RwLock::new(inner),
        }
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Item>> {
        let inner = self.inner.read().await;
        let mut records: Vec<&Record> = inner.records.values().collect();
        records.sort_by_key(|record| record.seq);
        let items = records.into_iter().map(|record| record.item.clone()).collect();
        Ok(items)
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Item>> {
        let inner = self.inner.read().await;
        Ok(inner.records.get(id).map(|record| record.item.clone()))
    }

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Item>> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .values()
            .filter(|record| record.item.name.as_deref() == Some(name))
            .min_by_key(|record| record.seq)
            .map(|record| record.item.clone()))
    }

    async fn save(&self, item: Item) -> RepositoryResult<Item> {
        let mut inner = self.inner.write().await;
        let seq = match inner.records.get(&item.id) {
            Some(existing) => existing.seq,
            None => {
                let seq = inner.next_seq;
                inner.next_seq += 1;
                seq
            }
        };
        inner.records.insert(
            item.id.clone(),
            Record {
                seq,
                item: item.clone(),
            },
        );
        Ok(item)
    }

    async fn replace(&self, item: Item) -> RepositoryResult<Option<Item>> {
        let mut inner = self.inner.write().await;
        Ok(inner.records.get_mut(&item.id).map(|record| {
            record.item = item.clone();
            item
        }))
    }

    async fn delete_by_id(&self, id: &str) -> RepositoryResult<()> {
        self.inner.write().await.records.remove(id);
        Ok(())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.inner.read().await.records.len() as u64)
    }
}
