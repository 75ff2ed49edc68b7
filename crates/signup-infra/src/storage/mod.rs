//! File storage implementations.

mod local;

pub use local::{DEFAULT_UPLOAD_DIR, LocalFileStore};
