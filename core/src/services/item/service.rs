//! Item service implementation.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use lh_shared::types::pagination::PageParams;

use crate::domain::entities::comment::{Comment, NewComment};
use crate::domain::entities::item::{Item, ItemPatch, NewItem};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{
    BookingRepository, CommentRepository, ItemRepository, ItemRequestRepository, UserRepository,
};

use super::view::{BookingRef, ItemView};

/// Service for listing, updating, searching and commenting on items.
///
/// Item views assembled here embed the last finished and next upcoming
/// bookings, but only when the caller owns the item.
pub struct ItemService<I, U, B, C, R>
where
    I: ItemRepository,
    U: UserRepository,
    B: BookingRepository,
    C: CommentRepository,
    R: ItemRequestRepository,
{
    item_repository: Arc<I>,
    user_repository: Arc<U>,
    booking_repository: Arc<B>,
    comment_repository: Arc<C>,
    request_repository: Arc<R>,
}

impl<I, U, B, C, R> ItemService<I, U, B, C, R>
where
    I: ItemRepository,
    U: UserRepository,
    B: BookingRepository,
    C: CommentRepository,
    R: ItemRequestRepository,
{
    pub fn new(
        item_repository: Arc<I>,
        user_repository: Arc<U>,
        booking_repository: Arc<B>,
        comment_repository: Arc<C>,
        request_repository: Arc<R>,
    ) -> Self {
        Self {
            item_repository,
            user_repository,
            booking_repository,
            comment_repository,
            request_repository,
        }
    }

    /// List a new item. A `request_id` pointing at a missing request is
    /// dropped rather than rejected.
    pub async fn create(&self, owner_id: i64, new: NewItem) -> DomainResult<Item> {
        debug!(owner_id, name = %new.name, "create item");
        let owner = self
            .user_repository
            .find_by_id(owner_id)
            .await?
            .ok_or(DomainError::not_found("user", owner_id))?;

        let request_id = match new.request_id {
            Some(id) => self.request_repository.find_by_id(id).await?.map(|r| r.id),
            None => None,
        };

        self.item_repository
            .create(Item {
                id: 0,
                name: new.name,
                description: new.description,
                available: new.available,
                owner,
                request_id,
            })
            .await
    }

    /// Patch an item. Only its owner may do so; blank strings are ignored.
    pub async fn update(
        &self,
        owner_id: i64,
        item_id: i64,
        patch: ItemPatch,
    ) -> DomainResult<Item> {
        debug!(owner_id, item_id, "update item");
        self.require_user(owner_id).await?;

        let mut item = self
            .item_repository
            .find_by_id(item_id)
            .await?
            .ok_or(DomainError::not_found("item", item_id))?;

        if !item.is_owned_by(owner_id) {
            return Err(DomainError::AccessDenied {
                user_id: owner_id,
                resource: "item",
                id: item_id,
            });
        }

        item.apply_patch(patch);
        self.item_repository.update(item).await
    }

    /// Fetch one item with comments; booking details appear only for the
    /// owner.
    pub async fn get_by_id(&self, item_id: i64, caller_id: i64) -> DomainResult<ItemView> {
        debug!(item_id, caller_id, "get item");
        self.require_user(caller_id).await?;

        let item = self
            .item_repository
            .find_by_id(item_id)
            .await?
            .ok_or(DomainError::not_found("item", item_id))?;

        self.assemble_view(item, caller_id).await
    }

    /// List the caller's items, id ascending, offset-paginated, each with
    /// comments and booking details.
    pub async fn list_by_owner(
        &self,
        owner_id: i64,
        page: PageParams,
    ) -> DomainResult<Vec<ItemView>> {
        debug!(owner_id, "list items by owner");
        self.require_user(owner_id).await?;

        let items = self.item_repository.find_all_by_owner(owner_id, page).await?;
        let mut views = Vec::with_capacity(items.len());
        for item in items {
            views.push(self.assemble_view(item, owner_id).await?);
        }
        Ok(views)
    }

    /// Search available items by name or description. Blank text returns an
    /// empty list.
    pub async fn search(&self, text: &str, page: PageParams) -> DomainResult<Vec<Item>> {
        debug!(text, "search items");
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.item_repository
            .search_available(text.trim(), page)
            .await
    }

    /// Comment on an item. Allowed only for users with at least one
    /// finished booking of this item.
    pub async fn add_comment(&self, author_id: i64, new: NewComment) -> DomainResult<Comment> {
        debug!(author_id, item_id = new.item_id, "add comment");
        let item = self
            .item_repository
            .find_by_id(new.item_id)
            .await?
            .ok_or(DomainError::not_found("item", new.item_id))?;
        let author = self
            .user_repository
            .find_by_id(author_id)
            .await?
            .ok_or(DomainError::not_found("user", author_id))?;

        let now = Utc::now();
        if !self
            .booking_repository
            .has_finished_booking(author_id, item.id, now)
            .await?
        {
            return Err(DomainError::CommentNotAllowed {
                user_id: author_id,
                item_id: item.id,
            });
        }

        self.comment_repository
            .create(Comment {
                id: 0,
                text: new.text,
                item_id: item.id,
                author,
                created: now,
            })
            .await
    }

    async fn assemble_view(&self, item: Item, caller_id: i64) -> DomainResult<ItemView> {
        let comments = self.comment_repository.find_all_by_item(item.id).await?;

        let (last_booking, next_booking) = if item.is_owned_by(caller_id) {
            let now = Utc::now();
            let last = self
                .booking_repository
                .find_last_for_item(item.id, now)
                .await?;
            let next = self
                .booking_repository
                .find_next_for_item(item.id, now)
                .await?;
            (
                last.as_ref().map(BookingRef::from),
                next.as_ref().map(BookingRef::from),
            )
        } else {
            (None, None)
        };

        Ok(ItemView {
            item,
            last_booking,
            next_booking,
            comments,
        })
    }

    async fn require_user(&self, user_id: i64) -> DomainResult<()> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::not_found("user", user_id))?;
        Ok(())
    }
}
