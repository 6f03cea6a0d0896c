//! Domain-specific error types and error handling.

use thiserror::Error;

use crate::domain::entities::BookingStatus;

/// Core domain errors surfaced to the API layer.
///
/// All variants are request-local failures: they are reported to the caller
/// with a descriptive message and never retried. Store failures arrive as
/// `Database` and map to a generic internal error at the HTTP boundary.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{resource} with id={id} was not found")]
    NotFound { resource: &'static str, id: i64 },

    #[error("user id={user_id} has no access to {resource} id={id}")]
    AccessDenied {
        user_id: i64,
        resource: &'static str,
        id: i64,
    },

    #[error("item id={item_id} is not available for booking")]
    Unavailable { item_id: i64 },

    #[error("owner id={owner_id} cannot book their own item id={item_id}")]
    SelfBookingForbidden { owner_id: i64, item_id: i64 },

    #[error("invalid booking time range: {message}")]
    InvalidTimeRange { message: String },

    #[error("booking id={booking_id} has already been decided: {status}")]
    AlreadyDecided {
        booking_id: i64,
        status: BookingStatus,
    },

    #[error("Unknown state: {value}")]
    UnknownState { value: String },

    #[error("user id={user_id} has no finished booking of item id={item_id}")]
    CommentNotAllowed { user_id: i64, item_id: i64 },

    #[error("email {email} is already taken")]
    EmailTaken { email: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    /// Shorthand used by the repository layer when a row lookup misses.
    pub fn not_found(resource: &'static str, id: i64) -> Self {
        DomainError::NotFound { resource, id }
    }

    /// Wrap a store failure.
    pub fn database(message: impl Into<String>) -> Self {
        DomainError::Database {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
