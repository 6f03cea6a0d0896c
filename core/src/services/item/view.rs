//! Read models assembled by the item service.

use serde::Serialize;

use crate::domain::entities::booking::Booking;
use crate::domain::entities::comment::Comment;
use crate::domain::entities::item::Item;

/// Short reference to a booking, embedded in item views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BookingRef {
    pub id: i64,
    pub booker_id: i64,
}

impl From<&Booking> for BookingRef {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id,
            booker_id: booking.booker.id,
        }
    }
}

/// An item together with its comments and, for the owner's eyes only, the
/// last finished and next upcoming bookings.
#[derive(Debug, Clone)]
pub struct ItemView {
    pub item: Item,
    pub last_booking: Option<BookingRef>,
    pub next_booking: Option<BookingRef>,
    pub comments: Vec<Comment>,
}
