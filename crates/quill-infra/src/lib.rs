//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the database repositories, their in-memory fallback,
//! and the authentication services.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM; without it
//!   only the in-memory repositories are available

pub mod auth;
pub mod database;
pub mod memory;

pub use auth::{Argon2PasswordService, JwtTokenService};
pub use memory::{
    InMemoryGroupRepository, InMemoryPostRepository, InMemoryStore, InMemoryUserRepository,
};

#[cfg(feature = "postgres")]
pub use database::DatabaseConnections;
