//! User domain types.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::Serialize;

use clearwater_core::{Email, UserRole};

/// A site user (read model).
///
/// This type deliberately has no password field: the stored hash is excluded
/// from default read projections and only travels through
/// [`crate::db::UserRepository::find_with_password_hash`].
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Document ID.
    pub id: ObjectId,
    /// Display name.
    pub name: String,
    /// Email address (unique, case-normalized).
    pub email: Email,
    /// Role attached to the account.
    pub role: UserRole,
    /// Whether the account is active.
    pub is_active: bool,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for inserting a new user record.
///
/// Carries a *hash*, never a plaintext password. Hashing happens in the auth
/// service before a `NewUser` is ever constructed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_user_carries_no_password_key() {
        let user = User {
            id: ObjectId::new(),
            name: "Site Administrator".to_string(),
            email: Email::parse("admin@clearwater.example").unwrap(),
            role: UserRole::Admin,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
        assert!(json.contains("admin@clearwater.example"));
    }
}
