//! # Warden Infrastructure
//!
//! Concrete implementations of the ports defined in `warden-core`.
//! This crate contains the database repositories, the in-memory fallback
//! and the authentication services.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM
//! - `minimal` - No external database, in-memory repositories only

pub mod auth;
pub mod database;
pub mod memory;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, DatabaseConnections};
pub use memory::InMemoryRepository;
