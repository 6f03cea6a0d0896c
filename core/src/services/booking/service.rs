//! Booking lifecycle service implementation.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use lh_shared::types::pagination::PageParams;

use crate::domain::entities::booking::{Booking, BookingStatus, NewBooking};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{BookingRepository, ItemRepository, UserRepository};

use super::state::BookingState;

/// Service owning the booking lifecycle: creation validation, the terminal
/// approve/reject transition, and the time-classified list queries.
pub struct BookingService<B, I, U>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    booking_repository: Arc<B>,
    item_repository: Arc<I>,
    user_repository: Arc<U>,
}

impl<B, I, U> BookingService<B, I, U>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    pub fn new(
        booking_repository: Arc<B>,
        item_repository: Arc<I>,
        user_repository: Arc<U>,
    ) -> Self {
        Self {
            booking_repository,
            item_repository,
            user_repository,
        }
    }

    /// Create a booking in WAITING status.
    ///
    /// Preconditions, checked in order: the booker exists, the item exists,
    /// the item is available, the booker is not the item's owner, the
    /// period starts no earlier than now and ends strictly after it starts.
    pub async fn create(&self, booker_id: i64, new: NewBooking) -> DomainResult<Booking> {
        debug!(booker_id, item_id = new.item_id, "create booking");

        let booker = self
            .user_repository
            .find_by_id(booker_id)
            .await?
            .ok_or(DomainError::not_found("user", booker_id))?;

        let item = self
            .item_repository
            .find_by_id(new.item_id)
            .await?
            .ok_or(DomainError::not_found("item", new.item_id))?;

        if !item.available {
            return Err(DomainError::Unavailable { item_id: item.id });
        }

        if item.is_owned_by(booker_id) {
            return Err(DomainError::SelfBookingForbidden {
                owner_id: booker_id,
                item_id: item.id,
            });
        }

        let now = Utc::now();
        if new.start < now {
            return Err(DomainError::InvalidTimeRange {
                message: format!(
                    "start ({}) must not be before the current moment ({})",
                    new.start, now
                ),
            });
        }
        if new.start >= new.end {
            return Err(DomainError::InvalidTimeRange {
                message: format!("start ({}) must be before end ({})", new.start, new.end),
            });
        }

        self.booking_repository
            .create(Booking {
                id: 0,
                start: new.start,
                end: new.end,
                item,
                booker,
                status: BookingStatus::Waiting,
            })
            .await
    }

    /// Fetch a booking. Only the booker and the item's owner may view it.
    pub async fn get_by_id(&self, requester_id: i64, booking_id: i64) -> DomainResult<Booking> {
        debug!(requester_id, booking_id, "get booking");

        let booking = self
            .booking_repository
            .find_by_id(booking_id)
            .await?
            .ok_or(DomainError::not_found("booking", booking_id))?;

        if booking.booker.id != requester_id && booking.item.owner.id != requester_id {
            return Err(DomainError::AccessDenied {
                user_id: requester_id,
                resource: "booking",
                id: booking_id,
            });
        }
        Ok(booking)
    }

    /// List the caller's own bookings, filtered by `state`, start
    /// descending, offset-paginated.
    pub async fn list_by_booker(
        &self,
        booker_id: i64,
        state: BookingState,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>> {
        debug!(booker_id, %state, "list bookings by booker");
        self.require_user(booker_id).await?;

        let now = Utc::now();
        match state {
            BookingState::All => self.booking_repository.find_all_by_booker(booker_id, page).await,
            BookingState::Current => {
                self.booking_repository
                    .find_current_by_booker(booker_id, now, page)
                    .await
            }
            BookingState::Past => {
                self.booking_repository
                    .find_past_by_booker(booker_id, now, page)
                    .await
            }
            BookingState::Future => {
                self.booking_repository
                    .find_future_by_booker(booker_id, now, page)
                    .await
            }
            BookingState::Waiting => {
                self.booking_repository
                    .find_by_booker_and_status(booker_id, BookingStatus::Waiting, page)
                    .await
            }
            BookingState::Rejected => {
                self.booking_repository
                    .find_by_booker_and_status(booker_id, BookingStatus::Rejected, page)
                    .await
            }
        }
    }

    /// List the bookings of items the caller owns, filtered by `state`,
    /// start descending, offset-paginated.
    pub async fn list_by_owner(
        &self,
        owner_id: i64,
        state: BookingState,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>> {
        debug!(owner_id, %state, "list bookings by item owner");
        self.require_user(owner_id).await?;

        let now = Utc::now();
        match state {
            BookingState::All => self.booking_repository.find_all_by_owner(owner_id, page).await,
            BookingState::Current => {
                self.booking_repository
                    .find_current_by_owner(owner_id, now, page)
                    .await
            }
            BookingState::Past => {
                self.booking_repository
                    .find_past_by_owner(owner_id, now, page)
                    .await
            }
            BookingState::Future => {
                self.booking_repository
                    .find_future_by_owner(owner_id, now, page)
                    .await
            }
            BookingState::Waiting => {
                self.booking_repository
                    .find_by_owner_and_status(owner_id, BookingStatus::Waiting, page)
                    .await
            }
            BookingState::Rejected => {
                self.booking_repository
                    .find_by_owner_and_status(owner_id, BookingStatus::Rejected, page)
                    .await
            }
        }
    }

    /// Decide a WAITING booking. Only the item's owner may decide, and only
    /// once: APPROVED and REJECTED are terminal.
    ///
    /// The store-level update is guarded on the WAITING status, so when two
    /// decisions race the loser observes the winner's terminal status and
    /// fails with `AlreadyDecided`.
    pub async fn set_approval(
        &self,
        owner_id: i64,
        booking_id: i64,
        approved: bool,
    ) -> DomainResult<Booking> {
        debug!(owner_id, booking_id, approved, "decide booking");
        self.require_user(owner_id).await?;

        let booking = self
            .booking_repository
            .find_by_id(booking_id)
            .await?
            .ok_or(DomainError::not_found("booking", booking_id))?;

        if booking.item.owner.id != owner_id {
            return Err(DomainError::AccessDenied {
                user_id: owner_id,
                resource: "booking",
                id: booking_id,
            });
        }

        if booking.status.is_terminal() {
            return Err(DomainError::AlreadyDecided {
                booking_id,
                status: booking.status,
            });
        }

        let status = if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };

        if self.booking_repository.update_status(booking_id, status).await? {
            Ok(Booking { status, ..booking })
        } else {
            // Lost a race: someone else decided between our read and write.
            let current = self
                .booking_repository
                .find_by_id(booking_id)
                .await?
                .ok_or(DomainError::not_found("booking", booking_id))?;
            Err(DomainError::AlreadyDecided {
                booking_id,
                status: current.status,
            })
        }
    }

    /// The most recently started booking of the item that has already
    /// finished, if any.
    pub async fn last_booking_for(&self, item_id: i64) -> DomainResult<Option<Booking>> {
        self.booking_repository
            .find_last_for_item(item_id, Utc::now())
            .await
    }

    /// The soonest-starting upcoming booking of the item, if any.
    pub async fn next_booking_for(&self, item_id: i64) -> DomainResult<Option<Booking>> {
        self.booking_repository
            .find_next_for_item(item_id, Utc::now())
            .await
    }

    /// Whether the user has at least one finished booking of the item.
    /// Gates comment creation.
    pub async fn has_past_booking_for(&self, user_id: i64, item_id: i64) -> DomainResult<bool> {
        self.booking_repository
            .has_finished_booking(user_id, item_id, Utc::now())
            .await
    }

    async fn require_user(&self, user_id: i64) -> DomainResult<()> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::not_found("user", user_id))?;
        Ok(())
    }
}
