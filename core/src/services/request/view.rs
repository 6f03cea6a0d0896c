//! Read model assembled by the request service.

use crate::domain::entities::item::Item;
use crate::domain::entities::item_request::ItemRequest;

/// A request together with the items listed in answer to it.
#[derive(Debug, Clone)]
pub struct ItemRequestView {
    pub request: ItemRequest,
    pub items: Vec<Item>,
}
