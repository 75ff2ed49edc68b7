use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// User entity - a persisted signup.
///
/// `id` and `created_at` are assigned by the user store, never by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Argon2 PHC string. Never leaves the service.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub image_path: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a user. The password is plaintext until the store
/// hashes it.
#[derive(Clone)]
pub struct NewUser {
    pub name: String,
    pub password: String,
    pub image_path: String,
    pub content: String,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        password: impl Into<String>,
        image_path: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
            image_path: image_path.into(),
            content: content.into(),
        }
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .field("image_path", &self.image_path)
            .field("content", &self.content)
            .finish()
    }
}

/// The mutable subset of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub id: Uuid,
    pub name: String,
    pub image_path: String,
    pub content: String,
}

impl UserChanges {
    /// Start from the current state of `user`, so callers only overwrite
    /// the fields they mean to change.
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            image_path: user.image_path.clone(),
            content: user.content.clone(),
        }
    }

    pub fn apply_to(self, user: &mut User) {
        user.name = self.name;
        user.image_path = self.image_path;
        user.content = self.content;
    }
}
