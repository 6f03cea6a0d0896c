//! Unit tests for the booking lifecycle engine, run against the in-memory
//! repositories.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use lh_shared::types::pagination::PageParams;

use crate::domain::entities::booking::{Booking, BookingStatus, NewBooking};
use crate::domain::entities::item::Item;
use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;
use crate::repositories::{
    BookingRepository, ItemRepository, MockBookingRepository, MockItemRepository,
    MockUserRepository, UserRepository,
};
use crate::services::booking::{BookingService, BookingState};

struct Fixture {
    bookings: Arc<MockBookingRepository>,
    items: Arc<MockItemRepository>,
    users: Arc<MockUserRepository>,
    service: BookingService<MockBookingRepository, MockItemRepository, MockUserRepository>,
    owner: User,
    booker: User,
    item: Item,
}

async fn fixture() -> Fixture {
    let bookings = Arc::new(MockBookingRepository::new());
    let items = Arc::new(MockItemRepository::new());
    let users = Arc::new(MockUserRepository::new());
    let service = BookingService::new(bookings.clone(), items.clone(), users.clone());

    let owner = users
        .create(NewUser {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        })
        .await
        .unwrap();
    let booker = users
        .create(NewUser {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
        })
        .await
        .unwrap();
    let item = items
        .create(Item {
            id: 0,
            name: "Cordless drill".to_string(),
            description: "18V, two batteries".to_string(),
            available: true,
            owner: owner.clone(),
            request_id: None,
        })
        .await
        .unwrap();

    Fixture {
        bookings,
        items,
        users,
        service,
        owner,
        booker,
        item,
    }
}

fn period(start_h: i64, end_h: i64) -> (DateTime<Utc>, DateTime<Utc>) {
    let now = Utc::now();
    (now + Duration::hours(start_h), now + Duration::hours(end_h))
}

/// Seed a booking directly through the repository, bypassing the service's
/// creation-time validation, so past and current periods can be set up.
async fn seed_booking(
    fx: &Fixture,
    start_h: i64,
    end_h: i64,
    status: BookingStatus,
) -> Booking {
    let (start, end) = period(start_h, end_h);
    fx.bookings
        .create(Booking {
            id: 0,
            start,
            end,
            item: fx.item.clone(),
            booker: fx.booker.clone(),
            status,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_booking_starts_waiting() {
    let fx = fixture().await;
    let (start, end) = period(1, 2);

    let booking = fx
        .service
        .create(
            fx.booker.id,
            NewBooking {
                item_id: fx.item.id,
                start,
                end,
            },
        )
        .await
        .unwrap();

    assert_eq!(booking.status, BookingStatus::Waiting);
    assert_eq!(booking.booker.id, fx.booker.id);
    assert_eq!(booking.item.id, fx.item.id);

    // Round trip: fetching as the booker returns identical fields.
    let fetched = fx.service.get_by_id(fx.booker.id, booking.id).await.unwrap();
    assert_eq!(fetched.start, booking.start);
    assert_eq!(fetched.end, booking.end);
    assert_eq!(fetched.item.id, booking.item.id);
    assert_eq!(fetched.status, booking.status);
}

#[tokio::test]
async fn test_create_fails_for_unavailable_item() {
    let fx = fixture().await;
    let unavailable = fx
        .items
        .create(Item {
            id: 0,
            name: "Broken ladder".to_string(),
            description: "do not lend".to_string(),
            available: false,
            owner: fx.owner.clone(),
            request_id: None,
        })
        .await
        .unwrap();

    let (start, end) = period(1, 2);
    let err = fx
        .service
        .create(
            fx.booker.id,
            NewBooking {
                item_id: unavailable.id,
                start,
                end,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Unavailable { item_id } if item_id == unavailable.id));
}

#[tokio::test]
async fn test_owner_cannot_book_own_item() {
    let fx = fixture().await;
    let (start, end) = period(1, 2);

    let err = fx
        .service
        .create(
            fx.owner.id,
            NewBooking {
                item_id: fx.item.id,
                start,
                end,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::SelfBookingForbidden { .. }));
}

#[tokio::test]
async fn test_create_rejects_start_in_past() {
    let fx = fixture().await;
    let (start, end) = period(-1, 2);

    let err = fx
        .service
        .create(
            fx.booker.id,
            NewBooking {
                item_id: fx.item.id,
                start,
                end,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::InvalidTimeRange { .. }));
}

#[tokio::test]
async fn test_create_rejects_start_not_strictly_before_end() {
    let fx = fixture().await;
    let now = Utc::now();
    let start = now + Duration::hours(1);

    // start == end
    let err = fx
        .service
        .create(
            fx.booker.id,
            NewBooking {
                item_id: fx.item.id,
                start,
                end: start,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidTimeRange { .. }));

    // start > end
    let err = fx
        .service
        .create(
            fx.booker.id,
            NewBooking {
                item_id: fx.item.id,
                start,
                end: start - Duration::minutes(30),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidTimeRange { .. }));
}

#[tokio::test]
async fn test_create_fails_for_missing_user_or_item() {
    let fx = fixture().await;
    let (start, end) = period(1, 2);

    let err = fx
        .service
        .create(
            999,
            NewBooking {
                item_id: fx.item.id,
                start,
                end,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { resource: "user", .. }));

    let err = fx
        .service
        .create(
            fx.booker.id,
            NewBooking {
                item_id: 999,
                start,
                end,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { resource: "item", .. }));
}

#[tokio::test]
async fn test_get_by_id_is_restricted_to_booker_and_owner() {
    let fx = fixture().await;
    let booking = seed_booking(&fx, 1, 2, BookingStatus::Waiting).await;

    assert!(fx.service.get_by_id(fx.booker.id, booking.id).await.is_ok());
    assert!(fx.service.get_by_id(fx.owner.id, booking.id).await.is_ok());

    let outsider = fx
        .users
        .create(NewUser {
            name: "Mallory".to_string(),
            email: "mallory@example.com".to_string(),
        })
        .await
        .unwrap();
    let err = fx.service.get_by_id(outsider.id, booking.id).await.unwrap_err();
    assert!(matches!(err, DomainError::AccessDenied { .. }));
}

#[tokio::test]
async fn test_get_by_id_missing_booking() {
    let fx = fixture().await;
    let err = fx.service.get_by_id(fx.booker.id, 404).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { resource: "booking", .. }));
}

#[tokio::test]
async fn test_approval_is_terminal() {
    let fx = fixture().await;
    let booking = seed_booking(&fx, 1, 2, BookingStatus::Waiting).await;

    let approved = fx
        .service
        .set_approval(fx.owner.id, booking.id, true)
        .await
        .unwrap();
    assert_eq!(approved.status, BookingStatus::Approved);

    // A second decision fails and leaves the status unchanged.
    let err = fx
        .service
        .set_approval(fx.owner.id, booking.id, false)
        .await
        .unwrap_err();
    match err {
        DomainError::AlreadyDecided { status, .. } => {
            assert_eq!(status, BookingStatus::Approved)
        }
        other => panic!("expected AlreadyDecided, got {other:?}"),
    }

    let stored = fx.bookings.find_by_id(booking.id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::Approved);
}

#[tokio::test]
async fn test_rejection_is_terminal() {
    let fx = fixture().await;
    let booking = seed_booking(&fx, 1, 2, BookingStatus::Waiting).await;

    let rejected = fx
        .service
        .set_approval(fx.owner.id, booking.id, false)
        .await
        .unwrap();
    assert_eq!(rejected.status, BookingStatus::Rejected);

    let err = fx
        .service
        .set_approval(fx.owner.id, booking.id, true)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::AlreadyDecided { .. }));
}

#[tokio::test]
async fn test_only_the_owner_decides() {
    let fx = fixture().await;
    let booking = seed_booking(&fx, 1, 2, BookingStatus::Waiting).await;

    let err = fx
        .service
        .set_approval(fx.booker.id, booking.id, true)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::AccessDenied { .. }));

    let stored = fx.bookings.find_by_id(booking.id).await.unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::Waiting);
}

#[tokio::test]
async fn test_set_approval_missing_booking() {
    let fx = fixture().await;
    let err = fx
        .service
        .set_approval(fx.owner.id, 404, true)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { resource: "booking", .. }));
}

#[tokio::test]
async fn test_straddling_booking_is_current_only() {
    let fx = fixture().await;
    seed_booking(&fx, -1, 1, BookingStatus::Approved).await;

    let current = fx
        .service
        .list_by_booker(fx.booker.id, BookingState::Current, PageParams::default())
        .await
        .unwrap();
    let past = fx
        .service
        .list_by_booker(fx.booker.id, BookingState::Past, PageParams::default())
        .await
        .unwrap();
    let future = fx
        .service
        .list_by_booker(fx.booker.id, BookingState::Future, PageParams::default())
        .await
        .unwrap();

    assert_eq!(current.len(), 1);
    assert!(past.is_empty());
    assert!(future.is_empty());
}

#[tokio::test]
async fn test_time_states_partition_the_booking_set() {
    let fx = fixture().await;
    seed_booking(&fx, -3, -2, BookingStatus::Approved).await;
    seed_booking(&fx, -1, 1, BookingStatus::Approved).await;
    seed_booking(&fx, 1, 2, BookingStatus::Waiting).await;
    seed_booking(&fx, 3, 4, BookingStatus::Rejected).await;

    let page = PageParams::new(0, 50);
    let all = fx
        .service
        .list_by_booker(fx.booker.id, BookingState::All, page)
        .await
        .unwrap();
    let current = fx
        .service
        .list_by_booker(fx.booker.id, BookingState::Current, page)
        .await
        .unwrap();
    let past = fx
        .service
        .list_by_booker(fx.booker.id, BookingState::Past, page)
        .await
        .unwrap();
    let future = fx
        .service
        .list_by_booker(fx.booker.id, BookingState::Future, page)
        .await
        .unwrap();

    assert_eq!(all.len(), current.len() + past.len() + future.len());
}

#[tokio::test]
async fn test_owner_lists_mirror_booker_lists() {
    let fx = fixture().await;
    seed_booking(&fx, 1, 2, BookingStatus::Waiting).await;
    seed_booking(&fx, 3, 4, BookingStatus::Rejected).await;

    let page = PageParams::default();
    let waiting = fx
        .service
        .list_by_owner(fx.owner.id, BookingState::Waiting, page)
        .await
        .unwrap();
    let rejected = fx
        .service
        .list_by_owner(fx.owner.id, BookingState::Rejected, page)
        .await
        .unwrap();

    assert_eq!(waiting.len(), 1);
    assert_eq!(rejected.len(), 1);
    assert_eq!(waiting[0].status, BookingStatus::Waiting);
    assert_eq!(rejected[0].status, BookingStatus::Rejected);
}

#[tokio::test]
async fn test_lists_are_start_descending() {
    let fx = fixture().await;
    for h in [5, 1, 3] {
        seed_booking(&fx, h, h + 1, BookingStatus::Waiting).await;
    }

    let all = fx
        .service
        .list_by_booker(fx.booker.id, BookingState::All, PageParams::default())
        .await
        .unwrap();
    let starts: Vec<_> = all.iter().map(|b| b.start).collect();
    let mut expected = starts.clone();
    expected.sort_by(|a, b| b.cmp(a));
    assert_eq!(starts, expected);
}

#[tokio::test]
async fn test_pagination_uses_raw_row_offset() {
    let fx = fixture().await;
    // Five bookings, starts 5h..1h from now; descending order is 5,4,3,2,1.
    for h in 1..=5 {
        seed_booking(&fx, h, h + 1, BookingStatus::Waiting).await;
    }

    let page = fx
        .service
        .list_by_booker(fx.booker.id, BookingState::All, PageParams::new(2, 2))
        .await
        .unwrap();
    let hours: Vec<i64> = page
        .iter()
        .map(|b| (b.start - Utc::now()).num_hours() + 1)
        .collect();
    assert_eq!(hours, vec![3, 2]);

    // An offset that is not a multiple of the size is still valid.
    let page = fx
        .service
        .list_by_booker(fx.booker.id, BookingState::All, PageParams::new(3, 2))
        .await
        .unwrap();
    let hours: Vec<i64> = page
        .iter()
        .map(|b| (b.start - Utc::now()).num_hours() + 1)
        .collect();
    assert_eq!(hours, vec![2, 1]);
}

#[tokio::test]
async fn test_listing_requires_known_user() {
    let fx = fixture().await;
    let err = fx
        .service
        .list_by_booker(999, BookingState::All, PageParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { resource: "user", .. }));

    let err = fx
        .service
        .list_by_owner(999, BookingState::All, PageParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { resource: "user", .. }));
}

// "Next" means soonest-starting. A descending sort would hand back the
// latest-starting future booking instead.
#[tokio::test]
async fn test_next_booking_picks_soonest_starting() {
    let fx = fixture().await;
    let soon = seed_booking(&fx, 2, 3, BookingStatus::Approved).await;
    seed_booking(&fx, 10, 11, BookingStatus::Approved).await;

    let next = fx.service.next_booking_for(fx.item.id).await.unwrap().unwrap();
    assert_eq!(next.id, soon.id);
}

#[tokio::test]
async fn test_last_booking_is_latest_started_finished_one() {
    let fx = fixture().await;
    seed_booking(&fx, -10, -9, BookingStatus::Approved).await;
    let latest = seed_booking(&fx, -4, -3, BookingStatus::Approved).await;
    seed_booking(&fx, -1, 1, BookingStatus::Approved).await; // still running

    let last = fx.service.last_booking_for(fx.item.id).await.unwrap().unwrap();
    assert_eq!(last.id, latest.id);
}

#[tokio::test]
async fn test_no_last_or_next_booking() {
    let fx = fixture().await;
    assert!(fx.service.last_booking_for(fx.item.id).await.unwrap().is_none());
    assert!(fx.service.next_booking_for(fx.item.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_past_booking_gate_is_per_item() {
    let fx = fixture().await;
    seed_booking(&fx, -2, -1, BookingStatus::Approved).await;

    assert!(fx
        .service
        .has_past_booking_for(fx.booker.id, fx.item.id)
        .await
        .unwrap());
    // A finished booking of one item does not open the gate for another.
    assert!(!fx
        .service
        .has_past_booking_for(fx.booker.id, fx.item.id + 1)
        .await
        .unwrap());
    // Someone who never booked has no gate open.
    assert!(!fx
        .service
        .has_past_booking_for(fx.owner.id, fx.item.id)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_current_booking_does_not_open_comment_gate() {
    let fx = fixture().await;
    seed_booking(&fx, -1, 1, BookingStatus::Approved).await;
    seed_booking(&fx, 2, 3, BookingStatus::Approved).await;

    assert!(!fx
        .service
        .has_past_booking_for(fx.booker.id, fx.item.id)
        .await
        .unwrap());
}
