//! MySQL implementation of the BookingRepository trait.
//!
//! One explicit query per filter, mirroring the shape of the service's
//! state dispatch. Every list orders by start time descending.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

use lh_core::domain::entities::booking::{Booking, BookingStatus};
use lh_core::domain::entities::item::Item;
use lh_core::domain::entities::user::User;
use lh_core::errors::{DomainError, DomainResult};
use lh_core::repositories::BookingRepository;
use lh_shared::types::pagination::PageParams;

/// Column list shared by every booking query; the item, its owner, and the
/// booker are loaded in the same round trip.
const BOOKING_SELECT: &str = r#"
    SELECT b.id, b.start_date, b.end_date, b.status,
           i.id AS item_id, i.name AS item_name, i.description AS item_description,
           i.available AS item_available, i.request_id AS item_request_id,
           o.id AS owner_id, o.name AS owner_name, o.email AS owner_email,
           u.id AS booker_id, u.name AS booker_name, u.email AS booker_email
    FROM bookings b
    JOIN items i ON i.id = b.item_id
    JOIN users o ON o.id = i.owner_id
    JOIN users u ON u.id = b.booker_id
"#;

/// MySQL implementation of BookingRepository
pub struct MySqlBookingRepository {
    pool: MySqlPool,
}

impl MySqlBookingRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn parse_status(value: &str) -> DomainResult<BookingStatus> {
        match value {
            "WAITING" => Ok(BookingStatus::Waiting),
            "APPROVED" => Ok(BookingStatus::Approved),
            "REJECTED" => Ok(BookingStatus::Rejected),
            other => Err(DomainError::database(format!(
                "unexpected booking status in store: {other}"
            ))),
        }
    }

    /// Convert an aliased booking row (see `BOOKING_SELECT`) to a Booking
    fn row_to_booking(row: &MySqlRow) -> DomainResult<Booking> {
        let get =
            |e: sqlx::Error, column: &str| DomainError::database(format!("failed to get {column}: {e}"));

        let owner = User {
            id: row.try_get("owner_id").map_err(|e| get(e, "owner_id"))?,
            name: row.try_get("owner_name").map_err(|e| get(e, "owner_name"))?,
            email: row
                .try_get("owner_email")
                .map_err(|e| get(e, "owner_email"))?,
        };
        let booker = User {
            id: row.try_get("booker_id").map_err(|e| get(e, "booker_id"))?,
            name: row
                .try_get("booker_name")
                .map_err(|e| get(e, "booker_name"))?,
            email: row
                .try_get("booker_email")
                .map_err(|e| get(e, "booker_email"))?,
        };
        let item = Item {
            id: row.try_get("item_id").map_err(|e| get(e, "item_id"))?,
            name: row.try_get("item_name").map_err(|e| get(e, "item_name"))?,
            description: row
                .try_get("item_description")
                .map_err(|e| get(e, "item_description"))?,
            available: row
                .try_get("item_available")
                .map_err(|e| get(e, "item_available"))?,
            owner,
            request_id: row
                .try_get("item_request_id")
                .map_err(|e| get(e, "item_request_id"))?,
        };

        let status: String = row.try_get("status").map_err(|e| get(e, "status"))?;

        Ok(Booking {
            id: row.try_get("id").map_err(|e| get(e, "id"))?,
            start: row
                .try_get::<DateTime<Utc>, _>("start_date")
                .map_err(|e| get(e, "start_date"))?,
            end: row
                .try_get::<DateTime<Utc>, _>("end_date")
                .map_err(|e| get(e, "end_date"))?,
            item,
            booker,
            status: Self::parse_status(&status)?,
        })
    }

    fn rows_to_bookings(rows: &[MySqlRow]) -> DomainResult<Vec<Booking>> {
        rows.iter().map(Self::row_to_booking).collect()
    }

    fn row_to_optional_booking(row: Option<MySqlRow>) -> DomainResult<Option<Booking>> {
        match row {
            Some(row) => Ok(Some(Self::row_to_booking(&row)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl BookingRepository for MySqlBookingRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Booking>> {
        let query = format!("{BOOKING_SELECT} WHERE b.id = ? LIMIT 1");

        let result = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("booking lookup failed: {e}")))?;

        Self::row_to_optional_booking(result)
    }

    async fn create(&self, booking: Booking) -> DomainResult<Booking> {
        let query = r#"
            INSERT INTO bookings (start_date, end_date, item_id, booker_id, status)
            VALUES (?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(booking.start)
            .bind(booking.end)
            .bind(booking.item.id)
            .bind(booking.booker.id)
            .bind(booking.status.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("failed to create booking: {e}")))?;

        Ok(Booking {
            id: result.last_insert_id() as i64,
            ..booking
        })
    }

    async fn update_status(&self, booking_id: i64, status: BookingStatus) -> DomainResult<bool> {
        // Guarded write: only moves out of WAITING, so of two racing
        // decisions exactly one sees rows_affected = 1.
        let query = r#"
            UPDATE bookings SET status = ?
            WHERE id = ? AND status = 'WAITING'
        "#;

        let result = sqlx::query(query)
            .bind(status.as_str())
            .bind(booking_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("failed to update booking: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_all_by_booker(
        &self,
        booker_id: i64,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>> {
        let query = format!(
            "{BOOKING_SELECT} WHERE b.booker_id = ? \
             ORDER BY b.start_date DESC LIMIT ? OFFSET ?"
        );

        let rows = sqlx::query(&query)
            .bind(booker_id)
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("booking listing failed: {e}")))?;

        Self::rows_to_bookings(&rows)
    }

    async fn find_current_by_booker(
        &self,
        booker_id: i64,
        now: DateTime<Utc>,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>> {
        let query = format!(
            "{BOOKING_SELECT} WHERE b.booker_id = ? AND b.start_date <= ? AND b.end_date > ? \
             ORDER BY b.start_date DESC LIMIT ? OFFSET ?"
        );

        let rows = sqlx::query(&query)
            .bind(booker_id)
            .bind(now)
            .bind(now)
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("booking listing failed: {e}")))?;

        Self::rows_to_bookings(&rows)
    }

    async fn find_past_by_booker(
        &self,
        booker_id: i64,
        now: DateTime<Utc>,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>> {
        let query = format!(
            "{BOOKING_SELECT} WHERE b.booker_id = ? AND b.end_date < ? \
             ORDER BY b.start_date DESC LIMIT ? OFFSET ?"
        );

        let rows = sqlx::query(&query)
            .bind(booker_id)
            .bind(now)
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("booking listing failed: {e}")))?;

        Self::rows_to_bookings(&rows)
    }

    async fn find_future_by_booker(
        &self,
        booker_id: i64,
        now: DateTime<Utc>,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>> {
        let query = format!(
            "{BOOKING_SELECT} WHERE b.booker_id = ? AND b.start_date > ? \
             ORDER BY b.start_date DESC LIMIT ? OFFSET ?"
        );

        let rows = sqlx::query(&query)
            .bind(booker_id)
            .bind(now)
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("booking listing failed: {e}")))?;

        Self::rows_to_bookings(&rows)
    }

    async fn find_by_booker_and_status(
        &self,
        booker_id: i64,
        status: BookingStatus,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>> {
        let query = format!(
            "{BOOKING_SELECT} WHERE b.booker_id = ? AND b.status = ? \
             ORDER BY b.start_date DESC LIMIT ? OFFSET ?"
        );

        let rows = sqlx::query(&query)
            .bind(booker_id)
            .bind(status.as_str())
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("booking listing failed: {e}")))?;

        Self::rows_to_bookings(&rows)
    }

    async fn find_all_by_owner(
        &self,
        owner_id: i64,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>> {
        let query = format!(
            "{BOOKING_SELECT} WHERE i.owner_id = ? \
             ORDER BY b.start_date DESC LIMIT ? OFFSET ?"
        );

        let rows = sqlx::query(&query)
            .bind(owner_id)
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("booking listing failed: {e}")))?;

        Self::rows_to_bookings(&rows)
    }

    async fn find_current_by_owner(
        &self,
        owner_id: i64,
        now: DateTime<Utc>,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>> {
        let query = format!(
            "{BOOKING_SELECT} WHERE i.owner_id = ? AND b.start_date <= ? AND b.end_date > ? \
             ORDER BY b.start_date DESC LIMIT ? OFFSET ?"
        );

        let rows = sqlx::query(&query)
            .bind(owner_id)
            .bind(now)
            .bind(now)
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("booking listing failed: {e}")))?;

        Self::rows_to_bookings(&rows)
    }

    async fn find_past_by_owner(
        &self,
        owner_id: i64,
        now: DateTime<Utc>,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>> {
        let query = format!(
            "{BOOKING_SELECT} WHERE i.owner_id = ? AND b.end_date < ? \
             ORDER BY b.start_date DESC LIMIT ? OFFSET ?"
        );

        let rows = sqlx::query(&query)
            .bind(owner_id)
            .bind(now)
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("booking listing failed: {e}")))?;

        Self::rows_to_bookings(&rows)
    }

    async fn find_future_by_owner(
        &self,
        owner_id: i64,
        now: DateTime<Utc>,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>> {
        let query = format!(
            "{BOOKING_SELECT} WHERE i.owner_id = ? AND b.start_date > ? \
             ORDER BY b.start_date DESC LIMIT ? OFFSET ?"
        );

        let rows = sqlx::query(&query)
            .bind(owner_id)
            .bind(now)
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("booking listing failed: {e}")))?;

        Self::rows_to_bookings(&rows)
    }

    async fn find_by_owner_and_status(
        &self,
        owner_id: i64,
        status: BookingStatus,
        page: PageParams,
    ) -> DomainResult<Vec<Booking>> {
        let query = format!(
            "{BOOKING_SELECT} WHERE i.owner_id = ? AND b.status = ? \
             ORDER BY b.start_date DESC LIMIT ? OFFSET ?"
        );

        let rows = sqlx::query(&query)
            .bind(owner_id)
            .bind(status.as_str())
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("booking listing failed: {e}")))?;

        Self::rows_to_bookings(&rows)
    }

    async fn find_last_for_item(
        &self,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Booking>> {
        let query = format!(
            "{BOOKING_SELECT} WHERE b.item_id = ? AND b.end_date < ? \
             ORDER BY b.start_date DESC LIMIT 1"
        );

        let result = sqlx::query(&query)
            .bind(item_id)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("booking lookup failed: {e}")))?;

        Self::row_to_optional_booking(result)
    }

    async fn find_next_for_item(
        &self,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Booking>> {
        // Ascending: the soonest-starting upcoming booking is "next".
        let query = format!(
            "{BOOKING_SELECT} WHERE b.item_id = ? AND b.start_date > ? \
             ORDER BY b.start_date ASC LIMIT 1"
        );

        let result = sqlx::query(&query)
            .bind(item_id)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("booking lookup failed: {e}")))?;

        Self::row_to_optional_booking(result)
    }

    async fn has_finished_booking(
        &self,
        booker_id: i64,
        item_id: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE booker_id = ? AND item_id = ? AND end_date < ?
            ) AS booking_exists
        "#;

        let row = sqlx::query(query)
            .bind(booker_id)
            .bind(item_id)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("booking lookup failed: {e}")))?;

        let exists: i64 = row
            .try_get("booking_exists")
            .map_err(|e| DomainError::database(format!("failed to get existence result: {e}")))?;

        Ok(exists == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_stored_status_parses() {
        for (raw, status) in [
            ("WAITING", BookingStatus::Waiting),
            ("APPROVED", BookingStatus::Approved),
            ("REJECTED", BookingStatus::Rejected),
        ] {
            assert_eq!(MySqlBookingRepository::parse_status(raw).unwrap(), status);
        }
    }

    #[test]
    fn test_unexpected_status_is_a_database_error() {
        let err = MySqlBookingRepository::parse_status("CANCELLED").unwrap_err();
        assert!(matches!(err, DomainError::Database { .. }));
    }
}
