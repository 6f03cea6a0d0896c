//! MySQL implementation of the ItemRepository trait.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use lh_core::domain::entities::item::Item;
use lh_core::domain::entities::user::User;
use lh_core::errors::{DomainError, DomainResult};
use lh_core::repositories::ItemRepository;
use lh_shared::types::pagination::PageParams;

/// Column list shared by every item query; the owner is loaded in the same
/// round trip.
const ITEM_SELECT: &str = r#"
    SELECT i.id, i.name, i.description, i.available, i.request_id,
           o.id AS owner_id, o.name AS owner_name, o.email AS owner_email
    FROM items i
    JOIN users o ON o.id = i.owner_id
"#;

/// MySQL implementation of ItemRepository
pub struct MySqlItemRepository {
    pool: MySqlPool,
}

impl MySqlItemRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert an aliased item row (see `ITEM_SELECT`) to an Item entity
    pub(crate) fn row_to_item(row: &sqlx::mysql::MySqlRow) -> DomainResult<Item> {
        let owner = User {
            id: row
                .try_get("owner_id")
                .map_err(|e| DomainError::database(format!("failed to get owner_id: {e}")))?,
            name: row
                .try_get("owner_name")
                .map_err(|e| DomainError::database(format!("failed to get owner_name: {e}")))?,
            email: row
                .try_get("owner_email")
                .map_err(|e| DomainError::database(format!("failed to get owner_email: {e}")))?,
        };

        Ok(Item {
            id: row
                .try_get("id")
                .map_err(|e| DomainError::database(format!("failed to get id: {e}")))?,
            name: row
                .try_get("name")
                .map_err(|e| DomainError::database(format!("failed to get name: {e}")))?,
            description: row
                .try_get("description")
                .map_err(|e| DomainError::database(format!("failed to get description: {e}")))?,
            available: row
                .try_get("available")
                .map_err(|e| DomainError::database(format!("failed to get available: {e}")))?,
            owner,
            request_id: row
                .try_get("request_id")
                .map_err(|e| DomainError::database(format!("failed to get request_id: {e}")))?,
        })
    }

    async fn fetch_by_id(&self, id: i64) -> DomainResult<Option<Item>> {
        let query = format!("{ITEM_SELECT} WHERE i.id = ? LIMIT 1");

        let result = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("item lookup failed: {e}")))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_item(&row)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl ItemRepository for MySqlItemRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Item>> {
        self.fetch_by_id(id).await
    }

    async fn find_all_by_owner(
        &self,
        owner_id: i64,
        page: PageParams,
    ) -> DomainResult<Vec<Item>> {
        let query = format!("{ITEM_SELECT} WHERE i.owner_id = ? ORDER BY i.id LIMIT ? OFFSET ?");

        let rows = sqlx::query(&query)
            .bind(owner_id)
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("item listing failed: {e}")))?;

        rows.iter().map(Self::row_to_item).collect()
    }

    async fn find_all_by_request(&self, request_id: i64) -> DomainResult<Vec<Item>> {
        let query = format!("{ITEM_SELECT} WHERE i.request_id = ? ORDER BY i.id");

        let rows = sqlx::query(&query)
            .bind(request_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("item listing failed: {e}")))?;

        rows.iter().map(Self::row_to_item).collect()
    }

    async fn search_available(&self, text: &str, page: PageParams) -> DomainResult<Vec<Item>> {
        let query = format!(
            "{ITEM_SELECT} \
             WHERE i.available = TRUE \
               AND (LOWER(i.name) LIKE CONCAT('%', ?, '%') \
                    OR LOWER(i.description) LIKE CONCAT('%', ?, '%')) \
             ORDER BY i.id LIMIT ? OFFSET ?"
        );
        let needle = text.to_lowercase();

        let rows = sqlx::query(&query)
            .bind(&needle)
            .bind(&needle)
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("item search failed: {e}")))?;

        rows.iter().map(Self::row_to_item).collect()
    }

    async fn create(&self, item: Item) -> DomainResult<Item> {
        let query = r#"
            INSERT INTO items (name, description, available, owner_id, request_id)
            VALUES (?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.available)
            .bind(item.owner.id)
            .bind(item.request_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("failed to create item: {e}")))?;

        Ok(Item {
            id: result.last_insert_id() as i64,
            ..item
        })
    }

    async fn update(&self, item: Item) -> DomainResult<Item> {
        let query = r#"
            UPDATE items SET
                name = ?,
                description = ?,
                available = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.available)
            .bind(item.id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("failed to update item: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("item", item.id));
        }
        Ok(item)
    }
}
