//! Booking entity and its lifecycle states.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::item::Item;
use super::user::User;

/// Lifecycle status of a booking.
///
/// Every booking starts as `Waiting`; the item's owner then moves it to
/// `Approved` or `Rejected`. Both decisions are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    /// Awaiting the owner's decision
    Waiting,
    /// Confirmed by the owner, terminal
    Approved,
    /// Declined by the owner, terminal
    Rejected,
}

impl BookingStatus {
    /// Whether no further transition is permitted from this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Approved | BookingStatus::Rejected)
    }

    /// Storage representation, matching the database enum column.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to borrow an item for the `[start, end)` period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier, assigned by the store
    pub id: i64,

    /// When the borrow period begins
    pub start: DateTime<Utc>,

    /// When the borrow period ends
    pub end: DateTime<Utc>,

    /// The item being borrowed
    pub item: Item,

    /// The user borrowing the item
    pub booker: User,

    /// Current lifecycle status
    pub status: BookingStatus,
}

/// Payload for requesting a booking; validated by the booking service
/// before it reaches the store.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub item_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Booking {
    /// Whether the period is in progress at `now`.
    pub fn is_current_at(&self, now: DateTime<Utc>) -> bool {
        self.start <= now && now < self.end
    }

    /// Whether the period finished before `now`.
    pub fn is_past_at(&self, now: DateTime<Utc>) -> bool {
        self.end < now
    }

    /// Whether the period starts after `now`.
    pub fn is_future_at(&self, now: DateTime<Utc>) -> bool {
        self.start > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn booking(start_offset_h: i64, end_offset_h: i64, now: DateTime<Utc>) -> Booking {
        let owner = User {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        };
        let booker = User {
            id: 2,
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
        };
        Booking {
            id: 10,
            start: now + Duration::hours(start_offset_h),
            end: now + Duration::hours(end_offset_h),
            item: Item {
                id: 7,
                name: "Drill".to_string(),
                description: "18V".to_string(),
                available: true,
                owner,
                request_id: None,
            },
            booker,
            status: BookingStatus::Waiting,
        }
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!BookingStatus::Waiting.is_terminal());
        assert!(BookingStatus::Approved.is_terminal());
        assert!(BookingStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_status_serializes_uppercase() {
        let json = serde_json::to_string(&BookingStatus::Waiting).unwrap();
        assert_eq!(json, "\"WAITING\"");
    }

    #[test]
    fn test_time_classification_is_a_partition() {
        let now = Utc::now();
        // One of current/past/future holds for any booking, never two.
        for (s, e) in [(-2, -1), (-1, 1), (1, 2)] {
            let b = booking(s, e, now);
            let flags = [b.is_current_at(now), b.is_past_at(now), b.is_future_at(now)];
            assert_eq!(flags.iter().filter(|f| **f).count(), 1, "offsets ({s}, {e})");
        }
    }

    #[test]
    fn test_straddling_booking_is_current() {
        let now = Utc::now();
        let b = booking(-1, 1, now);
        assert!(b.is_current_at(now));
        assert!(!b.is_past_at(now));
        assert!(!b.is_future_at(now));
    }
}
