//! Local-disk file store for uploaded images.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use signup_core::ports::{FileStore, StorageError};
use signup_core::validation::extension_of;

pub const DEFAULT_UPLOAD_DIR: &str = "uploads/images";

/// Writes uploads under a fixed base directory as
/// `<uuid>_<unix-timestamp><extension>`.
///
/// The random component keeps concurrent uploads of the same source filename
/// apart, so no locking is needed.
pub struct LocalFileStore {
    base_dir: PathBuf,
}

impl LocalFileStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn unique_name(original_filename: &str) -> String {
        format!(
            "{}_{}{}",
            Uuid::new_v4(),
            Utc::now().timestamp(),
            extension_of(original_filename)
        )
    }
}

impl Default for LocalFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_UPLOAD_DIR)
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn save(&self, original_filename: &str, body: Bytes) -> Result<String, StorageError> {
        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|source| StorageError::CreateDir {
                path: self.base_dir.display().to_string(),
                source,
            })?;

        let path = self.base_dir.join(Self::unique_name(original_filename));
        let stored = path.display().to_string();

        let mut file = fs::File::create(&path)
            .await
            .map_err(|source| StorageError::Open {
                path: stored.clone(),
                source,
            })?;

        file.write_all(&body)
            .await
            .map_err(|source| StorageError::Write {
                path: stored.clone(),
                source,
            })?;
        file.flush().await.map_err(|source| StorageError::Write {
            path: stored.clone(),
            source,
        })?;

        tracing::debug!(path = %stored, bytes = body.len(), "Stored uploaded file");
        Ok(stored)
    }

    async fn remove(&self, path: &str) -> Result<(), StorageError> {
        fs::remove_file(path)
            .await
            .map_err(|source| StorageError::Remove {
                path: path.to_string(),
                source,
            })?;

        tracing::debug!(path = %path, "Removed stored file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> LocalFileStore {
        LocalFileStore::new(dir.path().join("uploads").join("images"))
    }

    #[tokio::test]
    async fn test_save_creates_directory_and_copies_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let path = store
            .save("photo.png", Bytes::from_static(b"\x89PNG data"))
            .await
            .unwrap();

        assert!(store.base_dir().is_dir());
        assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG data");
    }

    #[tokio::test]
    async fn test_generated_name_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let path = store.save("Holiday.JPG", Bytes::from_static(b"x")).await.unwrap();
        let name = Path::new(&path).file_name().unwrap().to_str().unwrap();

        let (id, rest) = name.split_once('_').unwrap();
        assert!(Uuid::parse_str(id).is_ok());
        let timestamp = rest.strip_suffix(".JPG").unwrap();
        assert!(timestamp.parse::<i64>().unwrap() > 0);
        assert!(path.starts_with(&store.base_dir().display().to_string()));
    }

    #[tokio::test]
    async fn test_concurrent_saves_with_same_name_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let (a, b) = futures::join!(
            store.save("photo.png", Bytes::from_static(b"first")),
            store.save("photo.png", Bytes::from_static(b"second")),
        );
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_ne!(a, b);
        assert_eq!(std::fs::read(&a).unwrap(), b"first");
        assert_eq!(std::fs::read(&b).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_remove_deletes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let path = store.save("photo.gif", Bytes::from_static(b"gif")).await.unwrap();
        store.remove(&path).await.unwrap();

        assert!(!Path::new(&path).exists());
        assert!(matches!(
            store.remove(&path).await,
            Err(StorageError::Remove { .. })
        ));
    }

    #[tokio::test]
    async fn test_save_fails_when_base_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let store = LocalFileStore::new(blocker.join("images"));

        let err = store.save("photo.png", Bytes::from_static(b"x")).await;
        assert!(matches!(err, Err(StorageError::CreateDir { .. })));
    }
}
