//! MySQL implementation of the CommentRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use lh_core::domain::entities::comment::Comment;
use lh_core::domain::entities::user::User;
use lh_core::errors::{DomainError, DomainResult};
use lh_core::repositories::CommentRepository;

const COMMENT_SELECT: &str = r#"
    SELECT c.id, c.text, c.item_id, c.created,
           a.id AS author_id, a.name AS author_name, a.email AS author_email
    FROM comments c
    JOIN users a ON a.id = c.author_id
"#;

/// MySQL implementation of CommentRepository
pub struct MySqlCommentRepository {
    pool: MySqlPool,
}

impl MySqlCommentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_comment(row: &sqlx::mysql::MySqlRow) -> DomainResult<Comment> {
        let author = User {
            id: row
                .try_get("author_id")
                .map_err(|e| DomainError::database(format!("failed to get author_id: {e}")))?,
            name: row
                .try_get("author_name")
                .map_err(|e| DomainError::database(format!("failed to get author_name: {e}")))?,
            email: row
                .try_get("author_email")
                .map_err(|e| DomainError::database(format!("failed to get author_email: {e}")))?,
        };

        Ok(Comment {
            id: row
                .try_get("id")
                .map_err(|e| DomainError::database(format!("failed to get id: {e}")))?,
            text: row
                .try_get("text")
                .map_err(|e| DomainError::database(format!("failed to get text: {e}")))?,
            item_id: row
                .try_get("item_id")
                .map_err(|e| DomainError::database(format!("failed to get item_id: {e}")))?,
            author,
            created: row
                .try_get::<DateTime<Utc>, _>("created")
                .map_err(|e| DomainError::database(format!("failed to get created: {e}")))?,
        })
    }
}

#[async_trait]
impl CommentRepository for MySqlCommentRepository {
    async fn find_all_by_item(&self, item_id: i64) -> DomainResult<Vec<Comment>> {
        let query = format!("{COMMENT_SELECT} WHERE c.item_id = ? ORDER BY c.id");

        let rows = sqlx::query(&query)
            .bind(item_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("comment listing failed: {e}")))?;

        rows.iter().map(Self::row_to_comment).collect()
    }

    async fn create(&self, comment: Comment) -> DomainResult<Comment> {
        let query = r#"
            INSERT INTO comments (text, item_id, author_id, created)
            VALUES (?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&comment.text)
            .bind(comment.item_id)
            .bind(comment.author.id)
            .bind(comment.created)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("failed to create comment: {e}")))?;

        Ok(Comment {
            id: result.last_insert_id() as i64,
            ..comment
        })
    }
}
