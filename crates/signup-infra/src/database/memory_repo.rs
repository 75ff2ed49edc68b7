//! In-memory user repository - used when no database is configured and in
//! tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use signup_core::domain::{NewUser, User, UserChanges};
use signup_core::error::RepoError;
use signup_core::ports::{CredentialHasher, UserRepository};

use crate::auth::hash_credential;

/// Users kept in insertion order behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
    hasher: Arc<dyn CredentialHasher>,
}

impl InMemoryUserRepository {
    pub fn new(hasher: Arc<dyn CredentialHasher>) -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            hasher,
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let password_hash = hash_credential(&self.hasher, new_user.password).await?;

        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            password_hash,
            image_path: new_user.image_path,
            content: new_user.content,
            created_at: Utc::now(),
        };

        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User, RepoError> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn get_all(&self) -> Result<Vec<User>, RepoError> {
        // Newest insert first, so equal timestamps still come out newest first
        // after the stable sort.
        let mut users: Vec<User> = self.users.read().await.iter().rev().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn update(&self, changes: UserChanges) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == changes.id)
            .ok_or(RepoError::NotFound)?;

        changes.apply_to(user);
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);

        if users.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Argon2PasswordService, HashCost};

    fn repo() -> InMemoryUserRepository {
        let hasher = Argon2PasswordService::with_cost(HashCost {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        InMemoryUserRepository::new(Arc::new(hasher))
    }

    fn new_user(name: &str) -> NewUser {
        NewUser::new(name, "password1", "uploads/images/a.png", "hello")
    }

    #[tokio::test]
    async fn test_create_assigns_identity_and_hashes() {
        let repo = repo();
        let user = repo.create(new_user("Jo")).await.unwrap();

        assert!(!user.id.is_nil());
        assert_ne!(user.password_hash, "password1");
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_round_trip_by_id() {
        let repo = repo();
        let created = repo.create(new_user("Jo")).await.unwrap();
        let fetched = repo.get_by_id(created.id).await.unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_by_unknown_id_is_not_found() {
        let repo = repo();
        assert!(matches!(
            repo.get_by_id(Uuid::new_v4()).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_get_all_empty_is_ok() {
        assert!(repo().get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_all_newest_first() {
        let repo = repo();
        let first = repo.create(new_user("First")).await.unwrap();
        let second = repo.create(new_user("Second")).await.unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(
            all.iter().map(|u| u.id).collect::<Vec<_>>(),
            vec![second.id, first.id]
        );
    }

    #[tokio::test]
    async fn test_update_content_only() {
        let repo = repo();
        let created = repo.create(new_user("Jo")).await.unwrap();

        let mut changes = UserChanges::from_user(&created);
        changes.content = "updated".into();
        let updated = repo.update(changes).await.unwrap();

        assert_eq!(updated.content, "updated");
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.image_path, created.image_path);
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.password_hash, created.password_hash);
        assert_eq!(repo.get_by_id(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found() {
        let repo = repo();
        let changes = UserChanges {
            id: Uuid::new_v4(),
            name: "Jo".into(),
            image_path: "x.png".into(),
            content: "c".into(),
        };
        assert!(matches!(repo.update(changes).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo();
        let created = repo.create(new_user("Jo")).await.unwrap();

        repo.delete(created.id).await.unwrap();
        assert!(matches!(
            repo.get_by_id(created.id).await,
            Err(RepoError::NotFound)
        ));
        assert!(matches!(
            repo.delete(created.id).await,
            Err(RepoError::NotFound)
        ));
    }
}
