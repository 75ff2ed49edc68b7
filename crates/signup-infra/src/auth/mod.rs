//! Credential hashing implementations.

mod password;

use std::sync::Arc;

use signup_core::error::RepoError;
use signup_core::ports::CredentialHasher;

pub use password::{Argon2PasswordService, HashCost};

/// Run the hasher on the blocking pool. Argon2 is CPU-bound.
pub(crate) async fn hash_credential(
    hasher: &Arc<dyn CredentialHasher>,
    plain: String,
) -> Result<String, RepoError> {
    let hasher = Arc::clone(hasher);
    tokio::task::spawn_blocking(move || hasher.hash(&plain))
        .await
        .map_err(|e| RepoError::Hashing(e.to_string()))?
        .map_err(|e| RepoError::Hashing(e.0))
}
