use std::io;

use async_trait::async_trait;
use bytes::Bytes;

/// File store - durable copies of uploaded files under generated names.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Persist `body` under a fresh unique name that keeps the extension of
    /// `original_filename`. Returns the relative path of the new file.
    async fn save(&self, original_filename: &str, body: Bytes) -> Result<String, StorageError>;

    /// Remove a file previously returned by [`FileStore::save`].
    async fn remove(&self, path: &str) -> Result<(), StorageError>;
}

/// File storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to create upload directory {path}: {source}")]
    CreateDir { path: String, source: io::Error },

    #[error("failed to open destination file {path}: {source}")]
    Open { path: String, source: io::Error },

    #[error("failed to write file {path}: {source}")]
    Write { path: String, source: io::Error },

    #[error("failed to remove file {path}: {source}")]
    Remove { path: String, source: io::Error },
}
