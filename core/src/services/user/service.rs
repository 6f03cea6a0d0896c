//! User service implementation.

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::user::{NewUser, User, UserPatch};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserRepository;

/// CRUD over user accounts, enforcing email uniqueness.
pub struct UserService<U>
where
    U: UserRepository,
{
    user_repository: Arc<U>,
}

impl<U> UserService<U>
where
    U: UserRepository,
{
    pub fn new(user_repository: Arc<U>) -> Self {
        Self { user_repository }
    }

    pub async fn get_by_id(&self, user_id: i64) -> DomainResult<User> {
        debug!(user_id, "get user");
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::not_found("user", user_id))
    }

    pub async fn get_all(&self) -> DomainResult<Vec<User>> {
        debug!("list users");
        self.user_repository.find_all().await
    }

    pub async fn create(&self, new: NewUser) -> DomainResult<User> {
        debug!(email = %new.email, "create user");
        if self.user_repository.find_by_email(&new.email).await?.is_some() {
            return Err(DomainError::EmailTaken { email: new.email });
        }
        self.user_repository.create(new).await
    }

    /// Partially update a user. Absent and blank fields keep their current
    /// values; an email already held by another user is rejected.
    pub async fn update(&self, user_id: i64, patch: UserPatch) -> DomainResult<User> {
        debug!(user_id, "update user");
        let mut user = self.get_by_id(user_id).await?;

        if let Some(email) = patch.email.as_deref() {
            if !email.trim().is_empty() {
                if let Some(existing) = self.user_repository.find_by_email(email).await? {
                    if existing.id != user_id {
                        return Err(DomainError::EmailTaken {
                            email: email.to_string(),
                        });
                    }
                }
            }
        }

        user.apply_patch(patch);
        self.user_repository.update(user).await
    }

    pub async fn delete(&self, user_id: i64) -> DomainResult<()> {
        debug!(user_id, "delete user");
        if !self.user_repository.delete(user_id).await? {
            return Err(DomainError::not_found("user", user_id));
        }
        Ok(())
    }
}
