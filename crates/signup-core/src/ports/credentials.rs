//! Credential hashing port.

/// One-way, salted credential hashing.
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext credential into a self-describing hash string.
    fn hash(&self, plain: &str) -> Result<String, HashingError>;

    /// Check a plaintext credential against a stored hash.
    fn verify(&self, plain: &str, hash: &str) -> Result<bool, HashingError>;
}

#[derive(Debug, thiserror::Error)]
#[error("Hashing error: {0}")]
pub struct HashingError(pub String);
