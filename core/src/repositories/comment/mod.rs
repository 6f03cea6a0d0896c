mod mock;
mod repository;

pub use mock::MockCommentRepository;
pub use repository::CommentRepository;
