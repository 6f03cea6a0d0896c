//! Item repository trait defining the interface for item persistence.

use async_trait::async_trait;

use lh_shared::types::pagination::PageParams;

use crate::domain::entities::item::Item;
use crate::errors::DomainResult;

/// Persistence contract for `Item` entities.
///
/// Items are returned with their owner loaded; implementations resolve the
/// owner reference at query time (a JOIN in the MySQL case).
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Find an item by id, owner included.
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Item>>;

    /// List a user's items, id ascending, paginated.
    async fn find_all_by_owner(&self, owner_id: i64, page: PageParams)
        -> DomainResult<Vec<Item>>;

    /// List the items posted in answer to an item request, id ascending.
    async fn find_all_by_request(&self, request_id: i64) -> DomainResult<Vec<Item>>;

    /// Case-insensitive substring search over name and description,
    /// restricted to available items, id ascending, paginated.
    async fn search_available(&self, text: &str, page: PageParams) -> DomainResult<Vec<Item>>;

    /// Persist a new item and return it with the store-assigned id.
    /// The `id` field of the argument is ignored.
    async fn create(&self, item: Item) -> DomainResult<Item>;

    /// Overwrite an existing item's mutable fields (name, description,
    /// availability). The owner is immutable.
    async fn update(&self, item: Item) -> DomainResult<Item>;
}
