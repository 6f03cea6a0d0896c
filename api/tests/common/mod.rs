//! Shared wiring for endpoint tests: the real route table over the
//! in-memory repositories.

use std::sync::Arc;

use actix_web::web;

use lh_api::app::AppState;
use lh_core::repositories::{
    MockBookingRepository, MockCommentRepository, MockItemRepository, MockItemRequestRepository,
    MockUserRepository,
};

pub type TestState = AppState<
    MockUserRepository,
    MockItemRepository,
    MockBookingRepository,
    MockCommentRepository,
    MockItemRequestRepository,
>;

pub fn test_state() -> web::Data<TestState> {
    web::Data::new(AppState::new(
        Arc::new(MockUserRepository::new()),
        Arc::new(MockItemRepository::new()),
        Arc::new(MockBookingRepository::new()),
        Arc::new(MockCommentRepository::new()),
        Arc::new(MockItemRequestRepository::new()),
    ))
}

pub const SHARER_HEADER: &str = "X-Sharer-User-Id";
