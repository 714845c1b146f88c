//! Quill API server - wiring shared by the binary and the integration tests.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
