//! User store implementations and database connection management.

mod connections;
mod memory_repo;

#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::DatabaseConfig;
#[cfg(feature = "postgres")]
pub use connections::DatabaseConnections;
pub use memory_repo::InMemoryUserRepository;

#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresUserRepository;
