mod mock;
mod repository;

pub use mock::MockItemRequestRepository;
pub use repository::ItemRequestRepository;
