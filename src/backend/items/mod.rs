//! Items Module
//!
//! CRUD over item records.
//!
//! # Module Structure
//!
//! ```text
//! items/
//! ├── mod.rs        - Module exports and documentation
//! ├── repository.rs - Storage collaborator trait and its error type
//! ├── memory.rs     - In-memory repository
//! ├── db.rs         - PostgreSQL repository
//! ├── store.rs      - ItemStore service (id assignment, partial merge)
//! └── handlers.rs   - HTTP handlers for /api/v1/items
//! ```

/// Storage collaborator interface
pub mod repository;

/// In-memory repository
pub mod memory;

/// PostgreSQL repository
pub mod db;

/// Item CRUD service
pub mod store;

/// HTTP handlers
pub mod handlers;

pub use db::PgItemRepository;
pub use memory::InMemoryItemRepository;
pub use repository::{ItemRepository, RepositoryError};
pub use store::{ItemStore, ItemStoreError};
