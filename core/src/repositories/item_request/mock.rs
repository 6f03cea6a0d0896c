//! Mock implementation of ItemRequestRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use lh_shared::types::pagination::PageParams;

use crate::domain::entities::item_request::ItemRequest;
use crate::errors::DomainResult;

use super::repository::ItemRequestRepository;

/// In-memory item request repository for tests.
pub struct MockItemRequestRepository {
    requests: Arc<RwLock<HashMap<i64, ItemRequest>>>,
    next_id: AtomicI64,
}

impl MockItemRequestRepository {
    pub fn new() -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MockItemRequestRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn newest_first(requests: &mut [ItemRequest]) {
    requests.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));
}

#[async_trait]
impl ItemRequestRepository for MockItemRequestRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<ItemRequest>> {
        let requests = self.requests.read().await;
        Ok(requests.get(&id).cloned())
    }

    async fn find_all_by_requester(&self, requester_id: i64) -> DomainResult<Vec<ItemRequest>> {
        let requests = self.requests.read().await;
        let mut own: Vec<ItemRequest> = requests
            .values()
            .filter(|r| r.requester.id == requester_id)
            .cloned()
            .collect();
        newest_first(&mut own);
        Ok(own)
    }

    async fn find_all_from_others(
        &self,
        requester_id: i64,
        page: PageParams,
    ) -> DomainResult<Vec<ItemRequest>> {
        let requests = self.requests.read().await;
        let mut others: Vec<ItemRequest> = requests
            .values()
            .filter(|r| r.requester.id != requester_id)
            .cloned()
            .collect();
        newest_first(&mut others);
        Ok(others
            .into_iter()
            .skip(page.offset_usize())
            .take(page.limit_usize())
            .collect())
    }

    async fn create(&self, request: ItemRequest) -> DomainResult<ItemRequest> {
        let mut requests = self.requests.write().await;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = ItemRequest { id, ..request };
        requests.insert(id, created.clone());
        Ok(created)
    }
}
