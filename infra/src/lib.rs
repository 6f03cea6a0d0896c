//! # Infrastructure Layer
//!
//! Concrete persistence for the LendHub backend: MySQL implementations of
//! the `lh_core` repository traits, connection pool management, and schema
//! migrations. Nothing in this crate contains business rules; the booking
//! lifecycle and validation logic stay in `lh_core`.

pub mod database;

pub use database::connection::create_pool;
pub use database::mysql::{
    MySqlBookingRepository, MySqlCommentRepository, MySqlItemRepository,
    MySqlItemRequestRepository, MySqlUserRepository,
};
