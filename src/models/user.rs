use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered user record as persisted in storage.
///
/// The `password_hash` field never leaves the storage/service layer;
/// everything returned to callers goes through [`UserProfile`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique ID (UUID v4)
    pub id: String,
    /// Display name
    pub username: String,
    /// Email address (stored lowercased, unique)
    pub email: String,
    /// bcrypt password hash
    pub password_hash: String,
    /// Account creation time
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a new user record. The caller supplies an already-derived
    /// password hash; raw passwords never reach this type.
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }

    /// Hash-free view for API responses.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

/// Public view of a user. Carries no credential material.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        user.profile()
    }
}
