//! Data Transfer Objects - response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user as returned to clients. Carries no credential field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub image_path: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_camel_case_keys() {
        let user = UserResponse {
            id: Uuid::nil(),
            name: "Jo".into(),
            image_path: "uploads/images/x.png".into(),
            content: "hello".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["imagePath"], "uploads/images/x.png");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("image_path").is_none());
    }
}
