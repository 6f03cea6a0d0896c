use serde::{Deserialize, Serialize};
use validator::Validate;

use lh_core::domain::entities::user::{NewUser, User, UserPatch};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(custom = "super::validate_not_blank")]
    pub name: String,

    #[validate(email)]
    pub email: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(dto: CreateUserRequest) -> Self {
        NewUser {
            name: dto.name,
            email: dto.email,
        }
    }
}

/// Partial update; absent fields keep their current values.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(dto: UpdateUserRequest) -> Self {
        UserPatch {
            name: dto.name,
            email: dto.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}
