use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lh_core::domain::entities::booking::{Booking, BookingStatus, NewBooking};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub item_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl From<CreateBookingRequest> for NewBooking {
    fn from(dto: CreateBookingRequest) -> Self {
        NewBooking {
            item_id: dto.item_id,
            start: dto.start,
            end: dto.end,
        }
    }
}

/// Short item representation embedded in booking responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookedItemResponse {
    pub id: i64,
    pub name: String,
}

/// Short booker representation embedded in booking responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookerResponse {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub booker: BookerResponse,
    pub item: BookedItemResponse,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            start: booking.start,
            end: booking.end,
            status: booking.status,
            booker: BookerResponse {
                id: booking.booker.id,
            },
            item: BookedItemResponse {
                id: booking.item.id,
                name: booking.item.name,
            },
        }
    }
}

/// Query parameters for the booking list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingListQuery {
    pub state: Option<String>,
    pub from: Option<i64>,
    pub size: Option<i64>,
}

/// Query parameter for the owner's decision.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ApprovalQuery {
    pub approved: bool,
}
