//! Comment entity: feedback left by a past booker of an item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::User;

/// A comment on an item. Only users with at least one finished booking of
/// the item may comment; the booking service enforces the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier, assigned by the store
    pub id: i64,

    /// Comment text
    pub text: String,

    /// The item the comment is about
    pub item_id: i64,

    /// The user who wrote the comment
    pub author: User,

    /// When the comment was posted
    pub created: DateTime<Utc>,
}

/// Payload for posting a comment. The author is the calling user.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub text: String,
    pub item_id: i64,
}
