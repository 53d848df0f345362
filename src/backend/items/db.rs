/**
 * Database Operations for Items
 *
 * PostgreSQL implementation of `ItemRepository`. Sub-items are stored inline
 * as a JSONB document so an item is always read and written as one row.
 * `created_at` is set on first insert only and defines store order.
 */

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use super::repository::{ItemRepository, RepositoryResult};
use crate::shared::{Item, SubItem};

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: String,
    name: Option<String>,
    count: Option<i32>,
    sub_items: Json<Vec<SubItem>>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            name: row.name,
            count: row.count,
            sub_items: row.sub_items.0,
        }
    }
}

/// Item repository backed by a Postgres connection pool
#[derive(Clone)]
pub struct PgItemRepository {
    pool: PgPool,
}

impl PgItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, name, count, sub_items
            FROM items
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, name, count, sub_items
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Item::from))
    }

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, name, count, sub_items
            FROM items
            WHERE name = $1
            ORDER BY created_at ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Item::from))
    }

    async fn save(&self, item: Item) -> RepositoryResult<Item> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            INSERT INTO items (id, name, count, sub_items, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                count = EXCLUDED.count,
                sub_items = EXCLUDED.sub_items
            RETURNING id, name, count, sub_items
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.count)
        .bind(Json(&item.sub_items))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn replace(&self, item: Item) -> RepositoryResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            UPDATE items
            SET name = $2, count = $3, sub_items = $4
            WHERE id = $1
            RETURNING id, name, count, sub_items
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.count)
        .bind(Json(&item.sub_items))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Item::from))
    }

    async fn delete_by_id(&self, id: &str) -> RepositoryResult<()> {
        sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }
}
