//! Server Module
//!
//! Initialization and configuration of the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Repository selection (database loading)
//! └── init.rs         - State and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: Selects PostgreSQL or in-memory storage
//! 2. **State Creation**: Creates the item store and update publisher
//! 3. **Router Creation**: Configures all routes and middleware

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use state::{AppState, StreamSettings};
pub use init::{create_app, create_state};
