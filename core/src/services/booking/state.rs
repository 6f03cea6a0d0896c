//! Query-time classification of bookings for list endpoints.

use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Filter applied to booking lists, evaluated against "now" at query time.
///
/// `Current`, `Past` and `Future` partition any set of bookings for a fixed
/// instant; `Waiting` and `Rejected` select by status; `All` selects
/// everything. Values outside this closed set fail parsing with
/// `UnknownState` instead of falling through silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingState {
    All,
    /// `start <= now < end`
    Current,
    /// `end < now`
    Past,
    /// `start > now`
    Future,
    Waiting,
    Rejected,
}

impl FromStr for BookingState {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ALL" => Ok(BookingState::All),
            "CURRENT" => Ok(BookingState::Current),
            "PAST" => Ok(BookingState::Past),
            "FUTURE" => Ok(BookingState::Future),
            "WAITING" => Ok(BookingState::Waiting),
            "REJECTED" => Ok(BookingState::Rejected),
            other => Err(DomainError::UnknownState {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for BookingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BookingState::All => "ALL",
            BookingState::Current => "CURRENT",
            BookingState::Past => "PAST",
            BookingState::Future => "FUTURE",
            BookingState::Waiting => "WAITING",
            BookingState::Rejected => "REJECTED",
        };
        f.write_str(name)
    }
}
