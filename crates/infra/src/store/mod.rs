//! Storage seams used by the api crate.
//!
//! Each trait covers one collaborator: principals and their sessions, the
//! field registry, and bookings. [`PgStore`] is the production backend;
//! [`MemoryStore`] keeps everything in process memory.
//!
//! Booking writes that can collide ([`BookingStore::create_booking`] and
//! [`BookingStore::reschedule_booking`]) run the overlap engine inside the
//! implementation's per-field critical section and report conflicts as data.

use std::future::Future;

use chrono::{DateTime, Utc};
use sqlx::Result as SqlxResult;
use uuid::Uuid;

use crate::{
    models::{BookingRow, BookingStatus, FieldRow, Role, UserRow},
    pagination::LimitOffset,
    repos::{CreateBooking, CreateField, CreateUser},
    scheduling::Interval,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Clone)]
pub enum CreateBookingOutcome {
    Created(BookingRow),
    FieldNotFound,
    /// Ids of the blocking bookings; empty when only the database constraint caught it.
    Conflict(Vec<Uuid>),
}

#[derive(Debug, Clone)]
pub enum RescheduleOutcome {
    Rescheduled(BookingRow),
    NotFound,
    NotPending,
    Conflict(Vec<Uuid>),
}

pub trait IdentityStore: Send + Sync {
    /// `None` when the username is taken.
    fn create_user(&self, data: CreateUser) -> impl Future<Output = SqlxResult<Option<UserRow>>> + Send;

    fn get_user(&self, id: Uuid) -> impl Future<Output = SqlxResult<Option<UserRow>>> + Send;

    fn get_user_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = SqlxResult<Option<UserRow>>> + Send;

    fn list_users(
        &self,
        role: Option<Role>,
        page: LimitOffset,
    ) -> impl Future<Output = SqlxResult<Vec<UserRow>>> + Send;

    fn create_session(
        &self,
        token_hash: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> impl Future<Output = SqlxResult<()>> + Send;

    fn find_session_user(&self, token_hash: &str) -> impl Future<Output = SqlxResult<Option<UserRow>>> + Send;

    fn delete_session(&self, token_hash: &str) -> impl Future<Output = SqlxResult<bool>> + Send;

    fn delete_expired_sessions(&self) -> impl Future<Output = SqlxResult<u64>> + Send;
}

pub trait FieldStore: Send + Sync {
    fn create_field(&self, data: CreateField) -> impl Future<Output = SqlxResult<FieldRow>> + Send;

    fn get_field(&self, id: Uuid) -> impl Future<Output = SqlxResult<Option<FieldRow>>> + Send;

    fn list_fields(
        &self,
        owner_id: Option<Uuid>,
        page: LimitOffset,
    ) -> impl Future<Output = SqlxResult<Vec<FieldRow>>> + Send;

    fn delete_field(&self, id: Uuid) -> impl Future<Output = SqlxResult<bool>> + Send;
}

pub trait BookingStore: Send + Sync {
    /// Overlap check and insert as one atomic step per field.
    fn create_booking(
        &self,
        data: CreateBooking,
    ) -> impl Future<Output = SqlxResult<CreateBookingOutcome>> + Send;

    fn get_booking(&self, id: Uuid) -> impl Future<Output = SqlxResult<Option<BookingRow>>> + Send;

    fn list_bookings(&self, page: LimitOffset) -> impl Future<Output = SqlxResult<Vec<BookingRow>>> + Send;

    fn list_user_bookings(&self, user_id: Uuid) -> impl Future<Output = SqlxResult<Vec<BookingRow>>> + Send;

    fn list_field_bookings(&self, field_id: Uuid) -> impl Future<Output = SqlxResult<Vec<BookingRow>>> + Send;

    /// Compare-and-set; `None` if the booking is gone or not in `expected` anymore.
    fn update_booking_status(
        &self,
        id: Uuid,
        expected: BookingStatus,
        next: BookingStatus,
    ) -> impl Future<Output = SqlxResult<Option<BookingRow>>> + Send;

    /// Move a pending booking, re-running the overlap check atomically.
    fn reschedule_booking(
        &self,
        id: Uuid,
        interval: Interval,
        total_price_cents: Option<i64>,
    ) -> impl Future<Output = SqlxResult<RescheduleOutcome>> + Send;

    fn delete_booking(&self, id: Uuid) -> impl Future<Output = SqlxResult<bool>> + Send;
}

/// Everything the HTTP layer needs, bundled so it can be injected as one handle.
pub trait Store: IdentityStore + FieldStore + BookingStore + Clone + 'static {
    /// Cheap liveness probe.
    fn ping(&self) -> impl Future<Output = SqlxResult<()>> + Send;
}
