//! itemfeed - Main Library
//!
//! itemfeed stores named, countable items with nested priced sub-items and
//! streams every newly created item to live observers over Server-Sent
//! Events.
//!
//! # Module Structure
//!
//! - **`shared`** - Types independent of the HTTP server
//!   - Item and sub-item records, request payloads
//!   - Error types
//!   - Configuration
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server and routes
//!   - Item store over a pluggable repository (PostgreSQL or in-memory)
//!   - Broadcast publisher and event stream endpoint
//!
//! # Usage
//!
//! ```rust,no_run
//! use itemfeed::backend::server::init::create_app;
//! use itemfeed::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(&config).await;
//! let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Delivery Guarantees
//!
//! Stream clients receive items created while they are connected, in
//! creation order. Nothing is replayed after a reconnect, and a client
//! that falls too far behind loses its oldest undelivered items.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
