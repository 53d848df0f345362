//! Database test fixtures and utilities
//!
//! Postgres-backed tests connect through `DATABASE_URL` and are skipped
//! when it is unset, so the default test run needs no database. Tests share
//! one `items` table and run in parallel, so every test works with its own
//! id and name prefix instead of truncating.

use itemfeed::backend::items::PgItemRepository;
use sqlx::migrate::MigrateError;
use sqlx::PgPool;
use uuid::Uuid;

/// Connection string for database tests, if configured
pub fn database_url() -> Option<String> {
    std::env::var("DATABASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
}

/// Create a test database connection pool
pub async fn create_test_pool(database_url: &str) -> PgPool {
    PgPool::connect(database_url)
        .await
        .expect("Failed to create test database pool")
}

/// Run database migrations for testing
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Test database fixture
pub struct TestDatabase {
    pool: PgPool,
    prefix: String,
}

impl TestDatabase {
    /// Connect and migrate, or `None` when no database is configured
    pub async fn from_env() -> Option<Self> {
        let Some(url) = database_url() else {
            eprintln!("DATABASE_URL not set, skipping database test");
            return None;
        };

        let pool = create_test_pool(&url).await;
        run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            prefix: Uuid::new_v4().simple().to_string(),
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn repository(&self) -> PgItemRepository {
        PgItemRepository::new(self.pool.clone())
    }

    /// Identifier or name unique to this fixture
    pub fn scoped(&self, suffix: &str) -> String {
        format!("{}-{}", self.prefix, suffix)
    }

    /// Remove every row this fixture created
    pub async fn cleanup(&self) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM items WHERE id LIKE $1")
            .bind(format!("{}-%", self.prefix))
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
