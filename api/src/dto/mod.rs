//! Request and response DTOs.
//!
//! Wire field names are camelCase, matching the public contract. Request
//! DTOs carry `validator` rules for the checks that do not need the store;
//! everything else is validated in the services.

pub mod booking;
pub mod item;
pub mod request;
pub mod user;

use validator::ValidationError;

use lh_shared::utils::validation::not_blank;

/// Reject strings that are empty or whitespace-only.
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if not_blank(value) {
        Ok(())
    } else {
        Err(ValidationError::new("blank"))
    }
}
