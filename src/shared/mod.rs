//! Shared Module
//!
//! Types that are independent of the HTTP server: the item records exchanged
//! over the API and the update stream, shared error types, and application
//! configuration.

/// Item and sub-item records
pub mod item;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use item::{Item, ItemPayload, SubItem};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
