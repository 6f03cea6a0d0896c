//! Mock implementation of BookingRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use lh_shared::types::pagination::PageParams;

use crate::domain::entities::booking::{Booking, BookingStatus};
use crate::errors::DomainResult;

use super::repository::BookingRepository;

/// In-memory booking repository for tests. The `update_status` guard is the
/// same compare-and-set the MySQL implementation expresses as a conditional
/// UPDATE.
pub struct MockBookingRepository {
    bookings: Arc<RwLock<HashMap<i64, Booking>>>,
    next_id: AtomicI64,
}

impl MockBookingRepository {
    pub fn new() -> Self {
        Self {
            bookings: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }

    async fn collect<F>(&self, predicate: F, page: PageParams) -> Vec<Booking>
    where
        F: Fn(&Booking) -> bool,
    {
        let bookings = self.bookings.read().await;
        let mut matched: Vec<Booking> = bookings.values().filter(|b| predicate(b)).cloned().collect();
        // Start descending, id descending as a stable tie-break.
        matched.sort_by(|a, b| b.start.cmp(&a.start).then(b.id.cmp(&a.id)));
        matched
            .into_iter()
            .skip(page.offset_usize())
            .take(page.limit_usize())
            .collect()
    }
}

impl Default for MockBookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for MockBookingRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.get(&id).cloned())
    }

    async fn create(&self, booking: Booking) -> DomainResult<Booking> {
        let mut bookings = self.bookings.write().await;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Booking { id, ..booking };
        bookings.insert(id, created.clone());
        Ok(created)
    }

    async fn update_status(&self, booking_id: i64, status: BookingStatus) -> DomainResult<bool> {
        let mut bookings = self.bookings.write().await;
        match bookings.get_mut(&booking_id) {
            Some(b) if b.status == BookingStatus::Waiting => {
                b.status = status;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn find_all_by_booker(
        &self,
        booker_id: i64,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>> {
        Ok(self.collect(|b| b.booker.id == booker_id, page).await)
    }

    async fn find_current_by_booker(
        &self,
        booker_id: i64,
        now: DateTime<Utc>,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>> {
        Ok(self
            .collect(|b| b.booker.id == booker_id && b.is_current_at(now), page)
            .await)
    }

    async fn find_past_by_booker(
        &self,
        booker_id: i64,
        now: DateTime<Utc>,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>> {
        Ok(self
            .collect(|b| b.booker.id == booker_id && b.is_past_at(now), page)
            .await)
    }

    async fn find_future_by_booker(
        &self,
        booker_id: i64,
        now: DateTime<Utc>,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>> {
        Ok(self
            .collect(|b| b.booker.id == booker_id && b.is_future_at(now), page)
            .await)
    }

    async fn find_by_booker_and_status(
        &self,
        booker_id: i64,
        status: BookingStatus,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>> {
        Ok(self
            .collect(|b| b.booker.id == booker_id && b.status == status, page)
            .await)
    }

    async fn find_all_by_owner(
        &self,
        owner_id: i64,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>> {
        Ok(self.collect(|b| b.item.owner.id == owner_id, page).await)
    }

    async fn find_current_by_owner(
        &self,
        owner_id: i64,
        now: DateTime<Utc>,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>> {
        Ok(self
            .collect(|b| b.item.owner.id == owner_id && b.is_current_at(now), page)
            .await)
    }

    async fn find_past_by_owner(
        &self,
        owner_id: i64,
        now: DateTime<Utc>,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>> {
        Ok(self
            .collect(|b| b.item.owner.id == owner_id && b.is_past_at(now), page)
            .await)
    }

    async fn find_future_by_owner(
        &self,
        owner_id: i64,
        now: DateTime<Utc>,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>> {
        Ok(self
            .collect(|b| b.item.owner.id == owner_id && b.is_future_at(now), page)
            .await)
    }

    async fn find_by_owner_and_status(
        &self,
        owner_id: i64,
        status: BookingStatus,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>> {
        Ok(self
            .collect(|b| b.item.owner.id == owner_id && b.status == status, page)
            .await)
    }

    async fn find_last_for_item(
        &self,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .values()
            .filter(|b| b.item.id == item_id && b.is_past_at(now))
            .max_by_key(|b| b.start)
            .cloned())
    }

    async fn find_next_for_item(
        &self,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .values()
            .filter(|b| b.item.id == item_id && b.is_future_at(now))
            .min_by_key(|b| b.start)
            .cloned())
    }

    async fn has_finished_booking(
        &self,
        booker_id: i64,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .values()
            .any(|b| b.booker.id == booker_id && b.item.id == item_id && b.is_past_at(now)))
    }
}
