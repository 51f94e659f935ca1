use chrono::{DateTime, Utc};
use sqlx::Result as SqlxResult;
use uuid::Uuid;

use super::{BookingStore, CreateBookingOutcome, FieldStore, IdentityStore, RescheduleOutcome, Store};
use crate::{
    db::{is_exclusion_violation, Db},
    models::{BookingRow, BookingStatus, FieldRow, Role, UserRow},
    pagination::LimitOffset,
    repos::{bookings, fields, sessions, users, CreateBooking, CreateField, CreateUser},
    scheduling::{conflicting_bookings, Interval},
};

#[derive(Clone)]
pub struct PgStore {
    pool: Db,
}

impl PgStore {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }
}

impl IdentityStore for PgStore {
    async fn create_user(&self, data: CreateUser) -> SqlxResult<Option<UserRow>> {
        users::create(&self.pool, data).await
    }

    async fn get_user(&self, id: Uuid) -> SqlxResult<Option<UserRow>> {
        users::get_by_id(&self.pool, id).await
    }

    async fn get_user_by_username(&self, username: &str) -> SqlxResult<Option<UserRow>> {
        users::get_by_username(&self.pool, username).await
    }

    async fn list_users(&self, role: Option<Role>, page: LimitOffset) -> SqlxResult<Vec<UserRow>> {
        users::list(&self.pool, role, page).await
    }

    async fn create_session(
        &self,
        token_hash: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> SqlxResult<()> {
        sessions::create(&self.pool, token_hash, user_id, expires_at).await?;
        Ok(())
    }

    async fn find_session_user(&self, token_hash: &str) -> SqlxResult<Option<UserRow>> {
        sessions::find_user_by_token_hash(&self.pool, token_hash).await
    }

    async fn delete_session(&self, token_hash: &str) -> SqlxResult<bool> {
        sessions::delete_by_token_hash(&self.pool, token_hash).await
    }

    async fn delete_expired_sessions(&self) -> SqlxResult<u64> {
        sessions::delete_expired(&self.pool).await
    }
}

impl FieldStore for PgStore {
    async fn create_field(&self, data: CreateField) -> SqlxResult<FieldRow> {
        fields::create(&self.pool, data).await
    }

    async fn get_field(&self, id: Uuid) -> SqlxResult<Option<FieldRow>> {
        fields::get_by_id(&self.pool, id).await
    }

    async fn list_fields(&self, owner_id: Option<Uuid>, page: LimitOffset) -> SqlxResult<Vec<FieldRow>> {
        fields::list(&self.pool, owner_id, page).await
    }

    async fn delete_field(&self, id: Uuid) -> SqlxResult<bool> {
        fields::delete(&self.pool, id).await
    }
}

impl BookingStore for PgStore {
    async fn create_booking(&self, data: CreateBooking) -> SqlxResult<CreateBookingOutcome> {
        let mut tx = self.pool.begin().await?;

        // Serializes every writer targeting this field until commit.
        if fields::get_for_update(&mut *tx, data.field_id).await?.is_none() {
            return Ok(CreateBookingOutcome::FieldNotFound);
        }

        let existing = bookings::list_active_by_field(&mut *tx, data.field_id).await?;
        let blocking = conflicting_bookings(data.field_id, &data.interval, &existing, None);
        if !blocking.is_empty() {
            return Ok(CreateBookingOutcome::Conflict(blocking));
        }

        let row = match bookings::create(&mut *tx, data).await {
            Ok(row) => row,
            Err(e) if is_exclusion_violation(&e) => {
                tracing::warn!("Booking insert rejected by exclusion constraint");
                return Ok(CreateBookingOutcome::Conflict(Vec::new()));
            }
            Err(e) => return Err(e),
        };

        tx.commit().await?;
        Ok(CreateBookingOutcome::Created(row))
    }

    async fn get_booking(&self, id: Uuid) -> SqlxResult<Option<BookingRow>> {
        bookings::get_by_id(&self.pool, id).await
    }

    async fn list_bookings(&self, page: LimitOffset) -> SqlxResult<Vec<BookingRow>> {
        bookings::list(&self.pool, page).await
    }

    async fn list_user_bookings(&self, user_id: Uuid) -> SqlxResult<Vec<BookingRow>> {
        bookings::list_by_user(&self.pool, user_id).await
    }

    async fn list_field_bookings(&self, field_id: Uuid) -> SqlxResult<Vec<BookingRow>> {
        bookings::list_by_field(&self.pool, field_id).await
    }

    async fn update_booking_status(
        &self,
        id: Uuid,
        expected: BookingStatus,
        next: BookingStatus,
    ) -> SqlxResult<Option<BookingRow>> {
        bookings::update_status(&self.pool, id, expected, next).await
    }

    async fn reschedule_booking(
        &self,
        id: Uuid,
        interval: Interval,
        total_price_cents: Option<i64>,
    ) -> SqlxResult<RescheduleOutcome> {
        let mut tx = self.pool.begin().await?;

        let Some(current) = bookings::get_by_id(&mut *tx, id).await? else {
            return Ok(RescheduleOutcome::NotFound);
        };
        if current.status != BookingStatus::Pending {
            return Ok(RescheduleOutcome::NotPending);
        }

        if fields::get_for_update(&mut *tx, current.field_id).await?.is_none() {
            return Ok(RescheduleOutcome::NotFound);
        }

        let existing = bookings::list_active_by_field(&mut *tx, current.field_id).await?;
        let blocking = conflicting_bookings(current.field_id, &interval, &existing, Some(id));
        if !blocking.is_empty() {
            return Ok(RescheduleOutcome::Conflict(blocking));
        }

        let row = match bookings::update_interval(&mut *tx, id, interval, total_price_cents).await {
            Ok(Some(row)) => row,
            Ok(None) => return Ok(RescheduleOutcome::NotPending),
            Err(e) if is_exclusion_violation(&e) => {
                tracing::warn!("Booking move rejected by exclusion constraint");
                return Ok(RescheduleOutcome::Conflict(Vec::new()));
            }
            Err(e) => return Err(e),
        };

        tx.commit().await?;
        Ok(RescheduleOutcome::Rescheduled(row))
    }

    async fn delete_booking(&self, id: Uuid) -> SqlxResult<bool> {
        bookings::delete(&self.pool, id).await
    }
}

impl Store for PgStore {
    async fn ping(&self) -> SqlxResult<()> {
        let _one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
