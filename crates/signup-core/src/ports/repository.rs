use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewUser, User, UserChanges};
use crate::error::RepoError;

/// User store - create/read/update/delete over the backing store.
///
/// Implementations hash the credential in `create`, and generate `id` and
/// `created_at` themselves.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Hash the credential, insert the row, and return it with the
    /// store-generated id and timestamp.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;

    /// Fetch exactly one user, or `RepoError::NotFound`.
    async fn get_by_id(&self, id: Uuid) -> Result<User, RepoError>;

    /// All users, newest first. Empty when there are none.
    async fn get_all(&self) -> Result<Vec<User>, RepoError>;

    /// Overwrite `name`, `image_path` and `content` of an existing user.
    async fn update(&self, changes: UserChanges) -> Result<User, RepoError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}
