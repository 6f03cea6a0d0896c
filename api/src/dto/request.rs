use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use lh_core::domain::entities::item_request::{ItemRequest, NewItemRequest};
use lh_core::services::ItemRequestView;

use super::item::ItemResponse;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateItemRequestDto {
    #[validate(custom = "super::validate_not_blank")]
    pub description: String,
}

impl From<CreateItemRequestDto> for NewItemRequest {
    fn from(dto: CreateItemRequestDto) -> Self {
        NewItemRequest {
            description: dto.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequestResponse {
    pub id: i64,
    pub description: String,
    pub created: DateTime<Utc>,
    pub items: Vec<ItemResponse>,
}

impl From<ItemRequestView> for ItemRequestResponse {
    fn from(view: ItemRequestView) -> Self {
        Self {
            id: view.request.id,
            description: view.request.description,
            created: view.request.created,
            items: view.items.into_iter().map(ItemResponse::from).collect(),
        }
    }
}

impl From<ItemRequest> for ItemRequestResponse {
    fn from(request: ItemRequest) -> Self {
        Self {
            id: request.id,
            description: request.description,
            created: request.created,
            items: Vec::new(),
        }
    }
}
