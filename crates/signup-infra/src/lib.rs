//! # Signup Infrastructure
//!
//! Concrete implementations of the ports defined in `signup-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL user store via SeaORM
//! - `minimal` - No external services, in-memory user store only

pub mod auth;
pub mod database;
pub mod storage;

// Re-exports
pub use auth::{Argon2PasswordService, HashCost};
pub use database::{DatabaseConfig, InMemoryUserRepository};
pub use storage::LocalFileStore;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, PostgresUserRepository};
