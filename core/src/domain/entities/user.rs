//! User entity representing a registered LendHub account.

use serde::{Deserialize, Serialize};

/// A registered user. Users own items, book other users' items, and comment
/// on items they have borrowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned by the store
    pub id: i64,

    /// Display name
    pub name: String,

    /// Email address, unique across all users
    pub email: String,
}

/// Payload for creating a user; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Partial update of a user. Absent fields keep their current values.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl User {
    /// Apply a patch, ignoring absent and blank fields.
    pub fn apply_patch(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            if !name.trim().is_empty() {
                self.name = name;
            }
        }
        if let Some(email) = patch.email {
            if !email.trim().is_empty() {
                self.email = email;
            }
        }
    }
}
