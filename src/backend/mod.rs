//! Backend Module
//!
//! All server-side code: an Axum HTTP server exposing the item resource
//! and a Server-Sent Events feed of newly created items.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`items`** - Item store, repositories and CRUD handlers
//! - **`realtime`** - Broadcast publisher and event stream handler
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary entry point
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── items/          - Item CRUD
//! ├── realtime/       - Item broadcasting
//! └── error/          - Error types
//! ```
//!
//! # Data Flow
//!
//! A `POST /api/v1/items` commits the item through the `ItemStore`, then
//! hands the stored record to the `ItemUpdatesPublisher`. The publisher
//! queues it for every open `GET /api/v1/items/stream` connection. Reads,
//! updates and deletes touch only the store.
//!
//! # Thread Safety
//!
//! - The repository is shared as `Arc<dyn ItemRepository>`
//! - The publisher keeps its subscriber registry behind a mutex and never
//!   awaits while holding it
//! - Axum handlers are `Send + Sync`

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Item CRUD
pub mod items;

/// Real-time update system
pub mod realtime;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use server::{create_app, create_state, AppState};
pub use items::{ItemRepository, ItemStore};
pub use realtime::{handle_item_stream, ItemUpdatesPublisher};
pub use error::BackendError;
