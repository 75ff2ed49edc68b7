//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod credentials;
mod repository;
mod storage;

pub use credentials::{CredentialHasher, HashingError};
pub use repository::UserRepository;
pub use storage::{FileStore, StorageError};
