/**
 * Server Configuration
 *
 * This module turns the application configuration into a concrete item
 * repository, connecting to PostgreSQL when a database URL is configured.
 *
 * # Error Handling
 *
 * Database errors are logged but do not prevent server startup. If the
 * database is unavailable the server continues with the in-memory
 * repository.
 */

use sqlx::PgPool;
use std::sync::Arc;

use crate::backend::items::db::PgItemRepository;
use crate::backend::items::memory::InMemoryItemRepository;
use crate::backend::items::repository::ItemRepository;
use crate::shared::AppConfig;

/// Database configuration result
///
/// Contains the connection pool if successfully configured, or `None`.
pub type DatabaseConfig = Option<PgPool>;

/// Connect to PostgreSQL and run migrations
///
/// # Returns
///
/// - `Some(PgPool)` if the database is reachable
/// - `None` if no URL is configured or the connection fails
pub async fn load_database(database_url: Option<&str>) -> DatabaseConfig {
    let database_url = match database_url {
        Some(url) => url,
        None => {
            tracing::warn!("[Db] DATABASE_URL not set. Items will be kept in memory.");
            return None;
        }
    };

    tracing::info!("[Db] Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("[Db] Failed to create database connection pool: {:?}", e);
            tracing::warn!("[Db] Items will be kept in memory.");
            return None;
        }
    };

    tracing::info!("[Db] Database connection pool created successfully");

    tracing::info!("[Db] Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("[Db] Database migrations completed successfully");
        }
        Err(e) => {
            tracing::error!("[Db] Failed to run database migrations: {}", e);
            // The schema may already be in place from an earlier run.
            tracing::warn!("[Db] Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}

/// Select the item repository for this configuration
pub async fn load_repository(config: &AppConfig) -> Arc<dyn ItemRepository> {
    match load_database(config.database_url.as_deref()).await {
        Some(pool) => {
            tracing::info!("[Startup] Using PostgreSQL item repository");
            Arc::new(PgItemRepository::new(pool))
        }
        None => {
            tracing::info!("[Startup] Using in-memory item repository");
            Arc::new(InMemoryItemRepository::new())
        }
    }
}
