//! User repository trait defining the interface for user persistence.

use async_trait::async_trait;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainResult;

/// Persistence contract for `User` entities.
///
/// Identifiers are assigned by the store (auto-increment); callers never
/// supply them. Email uniqueness is enforced both here (lookup before
/// write in the service) and by the store's unique index.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id.
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>>;

    /// Find a user by exact email.
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// List every user, id ascending.
    async fn find_all(&self) -> DomainResult<Vec<User>>;

    /// Persist a new user and return it with the store-assigned id.
    async fn create(&self, user: NewUser) -> DomainResult<User>;

    /// Overwrite an existing user's mutable fields.
    async fn update(&self, user: User) -> DomainResult<User>;

    /// Delete a user by id. Returns whether a row was removed.
    async fn delete(&self, id: i64) -> DomainResult<bool>;
}
