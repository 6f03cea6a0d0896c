//! Item request entity: a want-ad for an item nobody has listed yet.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::User;

/// A user's expressed want for an item. Listed items may reference the
/// request that prompted them via `Item::request_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRequest {
    /// Unique identifier, assigned by the store
    pub id: i64,

    /// What the requester is looking for
    pub description: String,

    /// The user who posted the request
    pub requester: User,

    /// When the request was posted
    pub created: DateTime<Utc>,
}

/// Payload for posting a new item request. The requester is the calling
/// user.
#[derive(Debug, Clone)]
pub struct NewItemRequest {
    pub description: String,
}
