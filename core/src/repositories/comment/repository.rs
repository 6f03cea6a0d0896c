//! Comment repository trait.

use async_trait::async_trait;

use crate::domain::entities::comment::Comment;
use crate::errors::DomainResult;

/// Persistence contract for `Comment` entities.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// List an item's comments, oldest first.
    async fn find_all_by_item(&self, item_id: i64) -> DomainResult<Vec<Comment>>;

    /// Persist a new comment and return it with the store-assigned id.
    /// The `id` field of the argument is ignored.
    async fn create(&self, comment: Comment) -> DomainResult<Comment>;
}
