//! API integration tests
//!
//! Integration tests for the item endpoints
