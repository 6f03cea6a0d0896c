//! Mock implementation of CommentRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::comment::Comment;
use crate::errors::DomainResult;

use super::repository::CommentRepository;

/// In-memory comment repository for tests.
pub struct MockCommentRepository {
    comments: Arc<RwLock<HashMap<i64, Comment>>>,
    next_id: AtomicI64,
}

impl MockCommentRepository {
    pub fn new() -> Self {
        Self {
            comments: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MockCommentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommentRepository for MockCommentRepository {
    async fn find_all_by_item(&self, item_id: i64) -> DomainResult<Vec<Comment>> {
        let comments = self.comments.read().await;
        let mut found: Vec<Comment> = comments
            .values()
            .filter(|c| c.item_id == item_id)
            .cloned()
            .collect();
        found.sort_by_key(|c| c.id);
        Ok(found)
    }

    async fn create(&self, comment: Comment) -> DomainResult<Comment> {
        let mut comments = self.comments.write().await;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Comment { id, ..comment };
        comments.insert(id, created.clone());
        Ok(created)
    }
}
