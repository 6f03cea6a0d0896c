//! MySQL implementation of the ItemRequestRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use lh_core::domain::entities::item_request::ItemRequest;
use lh_core::domain::entities::user::User;
use lh_core::errors::{DomainError, DomainResult};
use lh_core::repositories::ItemRequestRepository;
use lh_shared::types::pagination::PageParams;

const REQUEST_SELECT: &str = r#"
    SELECT r.id, r.description, r.created,
           q.id AS requester_id, q.name AS requester_name, q.email AS requester_email
    FROM item_requests r
    JOIN users q ON q.id = r.requester_id
"#;

/// MySQL implementation of ItemRequestRepository
pub struct MySqlItemRequestRepository {
    pool: MySqlPool,
}

impl MySqlItemRequestRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_request(row: &sqlx::mysql::MySqlRow) -> DomainResult<ItemRequest> {
        let requester = User {
            id: row
                .try_get("requester_id")
                .map_err(|e| DomainError::database(format!("failed to get requester_id: {e}")))?,
            name: row
                .try_get("requester_name")
                .map_err(|e| DomainError::database(format!("failed to get requester_name: {e}")))?,
            email: row
                .try_get("requester_email")
                .map_err(|e| DomainError::database(format!("failed to get requester_email: {e}")))?,
        };

        Ok(ItemRequest {
            id: row
                .try_get("id")
                .map_err(|e| DomainError::database(format!("failed to get id: {e}")))?,
            description: row
                .try_get("description")
                .map_err(|e| DomainError::database(format!("failed to get description: {e}")))?,
            requester,
            created: row
                .try_get::<DateTime<Utc>, _>("created")
                .map_err(|e| DomainError::database(format!("failed to get created: {e}")))?,
        })
    }
}

#[async_trait]
impl ItemRequestRepository for MySqlItemRequestRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<ItemRequest>> {
        let query = format!("{REQUEST_SELECT} WHERE r.id = ? LIMIT 1");

        let result = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("item request lookup failed: {e}")))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_request(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_all_by_requester(&self, requester_id: i64) -> DomainResult<Vec<ItemRequest>> {
        let query = format!("{REQUEST_SELECT} WHERE r.requester_id = ? ORDER BY r.created DESC");

        let rows = sqlx::query(&query)
            .bind(requester_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("item request listing failed: {e}")))?;

        rows.iter().map(Self::row_to_request).collect()
    }

    async fn find_all_from_others(
        &self,
        requester_id: i64,
        page: PageParams,
    ) -> DomainResult<Vec<ItemRequest>> {
        let query = format!(
            "{REQUEST_SELECT} WHERE r.requester_id <> ? \
             ORDER BY r.created DESC LIMIT ? OFFSET ?"
        );

        let rows = sqlx::query(&query)
            .bind(requester_id)
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("item request listing failed: {e}")))?;

        rows.iter().map(Self::row_to_request).collect()
    }

    async fn create(&self, request: ItemRequest) -> DomainResult<ItemRequest> {
        let query = r#"
            INSERT INTO item_requests (description, requester_id, created)
            VALUES (?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&request.description)
            .bind(request.requester.id)
            .bind(request.created)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("failed to create item request: {e}")))?;

        Ok(ItemRequest {
            id: result.last_insert_id() as i64,
            ..request
        })
    }
}
