use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use lh_core::domain::entities::comment::Comment;
use lh_core::domain::entities::item::{Item, ItemPatch, NewItem};
use lh_core::services::{BookingRef, ItemView};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    #[validate(custom = "super::validate_not_blank")]
    pub name: String,

    #[validate(custom = "super::validate_not_blank")]
    pub description: String,

    pub available: bool,

    pub request_id: Option<i64>,
}

impl From<CreateItemRequest> for NewItem {
    fn from(dto: CreateItemRequest) -> Self {
        NewItem {
            name: dto.name,
            description: dto.description,
            available: dto.available,
            request_id: dto.request_id,
        }
    }
}

/// Partial update; absent fields keep their current values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

impl From<UpdateItemRequest> for ItemPatch {
    fn from(dto: UpdateItemRequest) -> Self {
        ItemPatch {
            name: dto.name,
            description: dto.description,
            available: dto.available,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<i64>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            request_id: item.request_id,
        }
    }
}

/// Short booking reference embedded in owner-facing item views.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingRefResponse {
    pub id: i64,
    pub booker_id: i64,
}

impl From<BookingRef> for BookingRefResponse {
    fn from(r: BookingRef) -> Self {
        Self {
            id: r.id,
            booker_id: r.booker_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i64,
    pub text: String,
    pub author_name: String,
    pub created: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            text: comment.text,
            author_name: comment.author.name,
            created: comment.created,
        }
    }
}

/// Full item representation: the item, its comments, and (for the owner)
/// the neighbouring bookings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetailResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<i64>,
    pub last_booking: Option<BookingRefResponse>,
    pub next_booking: Option<BookingRefResponse>,
    pub comments: Vec<CommentResponse>,
}

impl From<ItemView> for ItemDetailResponse {
    fn from(view: ItemView) -> Self {
        Self {
            id: view.item.id,
            name: view.item.name,
            description: view.item.description,
            available: view.item.available,
            request_id: view.item.request_id,
            last_booking: view.last_booking.map(BookingRefResponse::from),
            next_booking: view.next_booking.map(BookingRefResponse::from),
            comments: view.comments.into_iter().map(CommentResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(custom = "super::validate_not_blank")]
    pub text: String,
}

/// Query parameters for `GET /items/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub text: String,
    pub from: Option<i64>,
    pub size: Option<i64>,
}

/// Query parameters for plain paginated listings.
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    pub from: Option<i64>,
    pub size: Option<i64>,
}
