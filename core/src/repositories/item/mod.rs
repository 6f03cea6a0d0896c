mod mock;
mod repository;

pub use mock::MockItemRepository;
pub use repository::ItemRepository;
