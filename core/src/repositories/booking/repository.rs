//! Booking repository trait: persistence plus the time-filtered queries
//! the lifecycle engine is built on.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use lh_shared::types::pagination::PageParams;

use crate::domain::entities::booking::{Booking, BookingStatus};
use crate::errors::DomainResult;

/// Persistence contract for `Booking` entities.
///
/// Bookings are returned with their item (owner included) and booker
/// loaded. The reference instant `now` is always supplied by the caller so
/// the classification rules stay in one place and tests control the clock.
/// All list methods order by start time descending.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Find a booking by id.
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Booking>>;

    /// Persist a new booking and return it with the store-assigned id.
    /// The `id` field of the argument is ignored.
    async fn create(&self, booking: Booking) -> DomainResult<Booking>;

    /// Move a WAITING booking to a terminal status. The update is guarded:
    /// it only applies while the stored status is still WAITING, and the
    /// return value reports whether the guard held. Callers seeing `false`
    /// must re-read the row to learn the winning status.
    async fn update_status(&self, booking_id: i64, status: BookingStatus) -> DomainResult<bool>;

    /// All bookings made by a user.
    async fn find_all_by_booker(
        &self,
        booker_id: i64,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>>;

    /// A user's bookings with `start <= now < end`.
    async fn find_current_by_booker(
        &self,
        booker_id: i64,
        now: DateTime<Utc>,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>>;

    /// A user's bookings with `end < now`.
    async fn find_past_by_booker(
        &self,
        booker_id: i64,
        now: DateTime<Utc>,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>>;

    /// A user's bookings with `start > now`.
    async fn find_future_by_booker(
        &self,
        booker_id: i64,
        now: DateTime<Utc>,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>>;

    /// A user's bookings with the given status.
    async fn find_by_booker_and_status(
        &self,
        booker_id: i64,
        status: BookingStatus,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>>;

    /// All bookings of items the user owns.
    async fn find_all_by_owner(
        &self,
        owner_id: i64,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>>;

    /// Bookings of the user's items with `start <= now < end`.
    async fn find_current_by_owner(
        &self,
        owner_id: i64,
        now: DateTime<Utc>,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>>;

    /// Bookings of the user's items with `end < now`.
    async fn find_past_by_owner(
        &self,
        owner_id: i64,
        now: DateTime<Utc>,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>>;

    /// Bookings of the user's items with `start > now`.
    async fn find_future_by_owner(
        &self,
        owner_id: i64,
        now: DateTime<Utc>,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>>;

    /// Bookings of the user's items with the given status.
    async fn find_by_owner_and_status(
        &self,
        owner_id: i64,
        status: BookingStatus,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>>;

    /// The most recently started booking of an item that has already
    /// finished (`end < now`).
    async fn find_last_for_item(
        &self,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Booking>>;

    /// The soonest-starting upcoming booking of an item (`start > now`).
    async fn find_next_for_item(
        &self,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Booking>>;

    /// Whether the user has at least one finished booking of the item.
    async fn has_finished_booking(
        &self,
        booker_id: i64,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<bool>;
}
