use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::StoreError;
use crate::constants::BOOKING_STATUS_PENDING;
use crate::models::{Booking, NewBooking, StatusUpdate};

#[derive(Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, booking: &NewBooking, now: DateTime<Utc>) -> Result<i64, StoreError> {
        let result = sqlx::query(
            "INSERT INTO bookings (name, email, phone, car_id, car_name, date, time, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&booking.name)
        .bind(&booking.email)
        .bind(&booking.phone)
        .bind(booking.car_id.as_deref())
        .bind(booking.car_name.as_deref())
        .bind(&booking.date)
        .bind(&booking.time)
        .bind(BOOKING_STATUS_PENDING)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(StoreError::storage("create booking"))?;
        Ok(result.last_insert_rowid())
    }

    pub async fn list(&self, limit: Option<i64>) -> Result<Vec<Booking>, StoreError> {
        // LIMIT -1 is SQLite for "no limit"
        sqlx::query_as::<_, Booking>(
            "SELECT id, name, email, phone, car_id, car_name, date, time, status, notes, created_at
             FROM bookings ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(limit.filter(|l| *l > 0).unwrap_or(-1))
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::storage("list bookings"))
    }

    pub async fn update_status(&self, id: i64, update: &StatusUpdate) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE bookings SET status = COALESCE(?, status), notes = ? WHERE id = ?",
        )
        .bind(update.status.as_deref())
        .bind(update.notes.as_deref())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(StoreError::storage("update booking"))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("booking", id));
        }
        Ok(())
    }

    pub async fn count_pending(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings WHERE status = ?")
            .bind(BOOKING_STATUS_PENDING)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::storage("count pending bookings"))
    }

    pub async fn count_all(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::storage("count bookings"))
    }
}
