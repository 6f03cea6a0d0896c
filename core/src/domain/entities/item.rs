//! Item entity: something a user offers for sharing.

use serde::{Deserialize, Serialize};

use super::user::User;

/// An item listed for sharing. The owner is fixed at creation time;
/// `request_id` points at the want-ad that prompted the listing, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier, assigned by the store
    pub id: i64,

    /// Short display name
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Whether the item can currently be booked
    pub available: bool,

    /// The user who listed the item
    pub owner: User,

    /// The item request this listing answers, if any
    pub request_id: Option<i64>,
}

/// Payload for listing a new item. The owner is the calling user.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
}

/// Partial update of an item. Absent fields keep their current values.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

impl Item {
    /// Apply a patch, ignoring absent fields and blank strings.
    pub fn apply_patch(&mut self, patch: ItemPatch) {
        if let Some(name) = patch.name {
            if !name.trim().is_empty() {
                self.name = name;
            }
        }
        if let Some(description) = patch.description {
            if !description.trim().is_empty() {
                self.description = description;
            }
        }
        if let Some(available) = patch.available {
            self.available = available;
        }
    }

    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner.id == user_id
    }
}
