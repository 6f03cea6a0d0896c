//! Mock implementation of ItemRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use lh_shared::types::pagination::PageParams;

use crate::domain::entities::item::Item;
use crate::errors::DomainResult;

use super::repository::ItemRepository;

/// In-memory item repository for tests.
pub struct MockItemRepository {
    items: Arc<RwLock<HashMap<i64, Item>>>,
    next_id: AtomicI64,
}

impl MockItemRepository {
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MockItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemRepository for MockItemRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Item>> {
        let items = self.items.read().await;
        Ok(items.get(&id).cloned())
    }

    async fn find_all_by_owner(
        &self,
        owner_id: i64,
        page: PageParams,
    ) -> DomainResult<Vec<Item>> {
        let items = self.items.read().await;
        let mut owned: Vec<Item> = items
            .values()
            .filter(|i| i.owner.id == owner_id)
            .cloned()
            .collect();
        owned.sort_by_key(|i| i.id);
        Ok(owned
            .into_iter()
            .skip(page.offset_usize())
            .take(page.limit_usize())
            .collect())
    }

    async fn find_all_by_request(&self, request_id: i64) -> DomainResult<Vec<Item>> {
        let items = self.items.read().await;
        let mut answering: Vec<Item> = items
            .values()
            .filter(|i| i.request_id == Some(request_id))
            .cloned()
            .collect();
        answering.sort_by_key(|i| i.id);
        Ok(answering)
    }

    async fn search_available(&self, text: &str, page: PageParams) -> DomainResult<Vec<Item>> {
        let needle = text.to_lowercase();
        let items = self.items.read().await;
        let mut found: Vec<Item> = items
            .values()
            .filter(|i| {
                i.available
                    && (i.name.to_lowercase().contains(&needle)
                        || i.description.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        found.sort_by_key(|i| i.id);
        Ok(found
            .into_iter()
            .skip(page.offset_usize())
            .take(page.limit_usize())
            .collect())
    }

    async fn create(&self, item: Item) -> DomainResult<Item> {
        let mut items = self.items.write().await;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Item { id, ..item };
        items.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, item: Item) -> DomainResult<Item> {
        let mut items = self.items.write().await;
        items.insert(item.id, item.clone());
        Ok(item)
    }
}
