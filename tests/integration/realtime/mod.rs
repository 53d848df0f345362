//! Real-time integration tests
//!
//! Item creation flowing through to open event streams

mod stream_test;
