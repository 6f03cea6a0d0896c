//! Item request service implementation.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use lh_shared::types::pagination::PageParams;

use crate::domain::entities::item_request::{ItemRequest, NewItemRequest};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{ItemRepository, ItemRequestRepository, UserRepository};

use super::view::ItemRequestView;

/// Service for posting and browsing item requests.
pub struct RequestService<R, U, I>
where
    R: ItemRequestRepository,
    U: UserRepository,
    I: ItemRepository,
{
    request_repository: Arc<R>,
    user_repository: Arc<U>,
    item_repository: Arc<I>,
}

impl<R, U, I> RequestService<R, U, I>
where
    R: ItemRequestRepository,
    U: UserRepository,
    I: ItemRepository,
{
    pub fn new(
        request_repository: Arc<R>,
        user_repository: Arc<U>,
        item_repository: Arc<I>,
    ) -> Self {
        Self {
            request_repository,
            user_repository,
            item_repository,
        }
    }

    pub async fn create(
        &self,
        requester_id: i64,
        new: NewItemRequest,
    ) -> DomainResult<ItemRequest> {
        debug!(requester_id, "create item request");
        let requester = self
            .user_repository
            .find_by_id(requester_id)
            .await?
            .ok_or(DomainError::not_found("user", requester_id))?;

        self.request_repository
            .create(ItemRequest {
                id: 0,
                description: new.description,
                requester,
                created: Utc::now(),
            })
            .await
    }

    /// The caller's own requests, newest first, each with answering items.
    pub async fn list_own(&self, requester_id: i64) -> DomainResult<Vec<ItemRequestView>> {
        debug!(requester_id, "list own item requests");
        self.require_user(requester_id).await?;

        let requests = self
            .request_repository
            .find_all_by_requester(requester_id)
            .await?;
        self.assemble_views(requests).await
    }

    /// Other users' requests, newest first, offset-paginated.
    pub async fn list_from_others(
        &self,
        requester_id: i64,
        page: PageParams,
    ) -> DomainResult<Vec<ItemRequestView>> {
        debug!(requester_id, "list item requests from other users");
        self.require_user(requester_id).await?;

        let requests = self
            .request_repository
            .find_all_from_others(requester_id, page)
            .await?;
        self.assemble_views(requests).await
    }

    pub async fn get_by_id(
        &self,
        caller_id: i64,
        request_id: i64,
    ) -> DomainResult<ItemRequestView> {
        debug!(caller_id, request_id, "get item request");
        self.require_user(caller_id).await?;

        let request = self
            .request_repository
            .find_by_id(request_id)
            .await?
            .ok_or(DomainError::not_found("item request", request_id))?;

        let items = self.item_repository.find_all_by_request(request.id).await?;
        Ok(ItemRequestView { request, items })
    }

    async fn assemble_views(
        &self,
        requests: Vec<ItemRequest>,
    ) -> DomainResult<Vec<ItemRequestView>> {
        let mut views = Vec::with_capacity(requests.len());
        for request in requests {
            let items = self.item_repository.find_all_by_request(request.id).await?;
            views.push(ItemRequestView { request, items });
        }
        Ok(views)
    }

    async fn require_user(&self, user_id: i64) -> DomainResult<()> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::not_found("user", user_id))?;
        Ok(())
    }
}
