//! MySQL repository implementations.
//!
//! Rows referencing other entities (an item's owner, a booking's item and
//! booker) are loaded in one JOIN query; see the aliased column lists in
//! each implementation.

mod booking_repository_impl;
mod comment_repository_impl;
mod item_repository_impl;
mod item_request_repository_impl;
mod user_repository_impl;

pub use booking_repository_impl::MySqlBookingRepository;
pub use comment_repository_impl::MySqlCommentRepository;
pub use item_repository_impl::MySqlItemRepository;
pub use item_request_repository_impl::MySqlItemRequestRepository;
pub use user_repository_impl::MySqlUserRepository;
