//! Real-time Update Module
//!
//! Broadcasts newly created items to every connected stream client.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs          - Module exports and documentation
//! ├── broadcast.rs    - Multicast publisher with per-subscriber queues
//! └── subscription.rs - Server-Sent Events stream handler
//! ```
//!
//! # Real-time System
//!
//! Server-Sent Events give one-way delivery from server to client, which
//! is all the item feed needs. The publisher is created once at startup
//! and shared through application state; every stream connection takes its
//! own subscription and releases it when the connection ends.

/// Multicast publisher
pub mod broadcast;

/// Server-Sent Events stream handler
pub mod subscription;

// Re-export commonly used types and functions
pub use broadcast::{ItemUpdatesPublisher, Publisher, Subscription};
pub use subscription::handle_item_stream;
