//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use lh_core::domain::entities::user::{NewUser, User};
use lh_core::errors::{DomainError, DomainResult};
use lh_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a User entity
    pub(crate) fn row_to_user(row: &sqlx::mysql::MySqlRow) -> DomainResult<User> {
        Ok(User {
            id: row
                .try_get("id")
                .map_err(|e| DomainError::database(format!("failed to get id: {e}")))?,
            name: row
                .try_get("name")
                .map_err(|e| DomainError::database(format!("failed to get name: {e}")))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::database(format!("failed to get email: {e}")))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        let query = r#"
            SELECT id, name, email
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("user lookup failed: {e}")))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let query = r#"
            SELECT id, name, email
            FROM users
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("user lookup failed: {e}")))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let query = r#"
            SELECT id, name, email
            FROM users
            ORDER BY id
        "#;

        let rows = sqlx::query(query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("user listing failed: {e}")))?;

        rows.iter().map(Self::row_to_user).collect()
    }

    async fn create(&self, user: NewUser) -> DomainResult<User> {
        let query = r#"
            INSERT INTO users (name, email)
            VALUES (?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&user.name)
            .bind(&user.email)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("failed to create user: {e}")))?;

        Ok(User {
            id: result.last_insert_id() as i64,
            name: user.name,
            email: user.email,
        })
    }

    async fn update(&self, user: User) -> DomainResult<User> {
        let query = r#"
            UPDATE users SET
                name = ?,
                email = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("failed to update user: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("user", user.id));
        }
        Ok(user)
    }

    async fn delete(&self, id: i64) -> DomainResult<bool> {
        let query = "DELETE FROM users WHERE id = ?";

        let result = sqlx::query(query)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("failed to delete user: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}
