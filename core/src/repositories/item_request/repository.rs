//! Item request repository trait.

use async_trait::async_trait;

use lh_shared::types::pagination::PageParams;

use crate::domain::entities::item_request::ItemRequest;
use crate::errors::DomainResult;

/// Persistence contract for `ItemRequest` entities.
#[async_trait]
pub trait ItemRequestRepository: Send + Sync {
    /// Find a request by id, requester included.
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<ItemRequest>>;

    /// List a user's own requests, newest first.
    async fn find_all_by_requester(&self, requester_id: i64) -> DomainResult<Vec<ItemRequest>>;

    /// List other users' requests, newest first, paginated.
    async fn find_all_from_others(
        &self,
        requester_id: i64,
        page: PageParams,
    ) -> DomainResult<Vec<ItemRequest>>;

    /// Persist a new request and return it with the store-assigned id.
    /// The `id` field of the argument is ignored.
    async fn create(&self, request: ItemRequest) -> DomainResult<ItemRequest>;
}
