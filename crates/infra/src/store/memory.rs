use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use sqlx::Result as SqlxResult;
use uuid::Uuid;

use super::{BookingStore, CreateBookingOutcome, FieldStore, IdentityStore, RescheduleOutcome, Store};
use crate::{
    models::{BookingRow, BookingStatus, FieldRow, Role, SessionRow, UserRow},
    pagination::LimitOffset,
    repos::{CreateBooking, CreateField, CreateUser},
    scheduling::{conflicting_bookings, Interval},
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, UserRow>,
    sessions: HashMap<String, SessionRow>,
    fields: HashMap<Uuid, FieldRow>,
    bookings: HashMap<Uuid, BookingRow>,
}

/// In-process store. One mutex guards all tables, so a booking's overlap
/// check and its write always happen under the same lock.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn paginate<T>(rows: Vec<T>, page: LimitOffset) -> Vec<T> {
    rows.into_iter()
        .skip(page.offset as usize)
        .take(page.limit as usize)
        .collect()
}

fn sorted_by_date(mut rows: Vec<BookingRow>) -> Vec<BookingRow> {
    rows.sort_by(|a, b| a.booking_date.cmp(&b.booking_date).then(a.id.cmp(&b.id)));
    rows
}

impl IdentityStore for MemoryStore {
    async fn create_user(&self, data: CreateUser) -> SqlxResult<Option<UserRow>> {
        let mut tables = self.tables.lock();
        if tables.users.values().any(|u| u.username == data.username) {
            return Ok(None);
        }

        let now = Utc::now();
        let row = UserRow {
            id: Uuid::new_v4(),
            username: data.username,
            name: data.name,
            password_hash: data.password_hash,
            role: data.role,
            email: data.email,
            phone_number: data.phone_number,
            instagram: data.instagram,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(row.id, row.clone());
        Ok(Some(row))
    }

    async fn get_user(&self, id: Uuid) -> SqlxResult<Option<UserRow>> {
        Ok(self.tables.lock().users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> SqlxResult<Option<UserRow>> {
        Ok(self
            .tables
            .lock()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list_users(&self, role: Option<Role>, page: LimitOffset) -> SqlxResult<Vec<UserRow>> {
        let mut rows: Vec<UserRow> = self
            .tables
            .lock()
            .users
            .values()
            .filter(|u| role.is_none_or(|r| u.role == r))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(paginate(rows, page))
    }

    async fn create_session(
        &self,
        token_hash: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> SqlxResult<()> {
        let row = SessionRow {
            id: Uuid::new_v4(),
            token_hash: token_hash.to_string(),
            user_id,
            expires_at,
            created_at: Utc::now(),
        };
        self.tables.lock().sessions.insert(row.token_hash.clone(), row);
        Ok(())
    }

    async fn find_session_user(&self, token_hash: &str) -> SqlxResult<Option<UserRow>> {
        let tables = self.tables.lock();
        let user = tables
            .sessions
            .get(token_hash)
            .filter(|s| s.expires_at > Utc::now())
            .and_then(|s| tables.users.get(&s.user_id))
            .cloned();
        Ok(user)
    }

    async fn delete_session(&self, token_hash: &str) -> SqlxResult<bool> {
        Ok(self.tables.lock().sessions.remove(token_hash).is_some())
    }

    async fn delete_expired_sessions(&self) -> SqlxResult<u64> {
        let now = Utc::now();
        let mut tables = self.tables.lock();
        let before = tables.sessions.len();
        tables.sessions.retain(|_, s| s.expires_at > now);
        Ok((before - tables.sessions.len()) as u64)
    }
}

impl FieldStore for MemoryStore {
    async fn create_field(&self, data: CreateField) -> SqlxResult<FieldRow> {
        let now = Utc::now();
        let row = FieldRow {
            id: Uuid::new_v4(),
            owner_id: data.owner_id,
            name: data.name,
            location: data.location,
            surface_type: data.surface_type,
            width: data.width,
            height: data.height,
            hourly_rate_cents: data.hourly_rate_cents,
            start_time: data.start_time,
            end_time: data.end_time,
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().fields.insert(row.id, row.clone());
        Ok(row)
    }

    async fn get_field(&self, id: Uuid) -> SqlxResult<Option<FieldRow>> {
        Ok(self.tables.lock().fields.get(&id).cloned())
    }

    async fn list_fields(&self, owner_id: Option<Uuid>, page: LimitOffset) -> SqlxResult<Vec<FieldRow>> {
        let mut rows: Vec<FieldRow> = self
            .tables
            .lock()
            .fields
            .values()
            .filter(|f| owner_id.is_none_or(|o| f.owner_id == o))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(paginate(rows, page))
    }

    async fn delete_field(&self, id: Uuid) -> SqlxResult<bool> {
        let mut tables = self.tables.lock();
        let removed = tables.fields.remove(&id).is_some();
        if removed {
            tables.bookings.retain(|_, b| b.field_id != id);
        }
        Ok(removed)
    }
}

impl BookingStore for MemoryStore {
    async fn create_booking(&self, data: CreateBooking) -> SqlxResult<CreateBookingOutcome> {
        let mut tables = self.tables.lock();
        if !tables.fields.contains_key(&data.field_id) {
            return Ok(CreateBookingOutcome::FieldNotFound);
        }

        let existing: Vec<BookingRow> = tables.bookings.values().cloned().collect();
        let blocking = conflicting_bookings(data.field_id, &data.interval, &existing, None);
        if !blocking.is_empty() {
            return Ok(CreateBookingOutcome::Conflict(blocking));
        }

        let now = Utc::now();
        let row = BookingRow {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            field_id: data.field_id,
            booking_date: data.interval.start,
            booked_until: data.interval.end,
            status: BookingStatus::Pending,
            total_price_cents: data.total_price_cents,
            created_at: now,
            updated_at: now,
        };
        tables.bookings.insert(row.id, row.clone());
        Ok(CreateBookingOutcome::Created(row))
    }

    async fn get_booking(&self, id: Uuid) -> SqlxResult<Option<BookingRow>> {
        Ok(self.tables.lock().bookings.get(&id).cloned())
    }

    async fn list_bookings(&self, page: LimitOffset) -> SqlxResult<Vec<BookingRow>> {
        let rows: Vec<BookingRow> = self.tables.lock().bookings.values().cloned().collect();
        Ok(paginate(sorted_by_date(rows), page))
    }

    async fn list_user_bookings(&self, user_id: Uuid) -> SqlxResult<Vec<BookingRow>> {
        let rows = self
            .tables
            .lock()
            .bookings
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        Ok(sorted_by_date(rows))
    }

    async fn list_field_bookings(&self, field_id: Uuid) -> SqlxResult<Vec<BookingRow>> {
        let rows = self
            .tables
            .lock()
            .bookings
            .values()
            .filter(|b| b.field_id == field_id)
            .cloned()
            .collect();
        Ok(sorted_by_date(rows))
    }

    async fn update_booking_status(
        &self,
        id: Uuid,
        expected: BookingStatus,
        next: BookingStatus,
    ) -> SqlxResult<Option<BookingRow>> {
        let mut tables = self.tables.lock();
        let Some(booking) = tables.bookings.get_mut(&id) else {
            return Ok(None);
        };
        if booking.status != expected {
            return Ok(None);
        }
        booking.status = next;
        booking.updated_at = Utc::now();
        Ok(Some(booking.clone()))
    }

    async fn reschedule_booking(
        &self,
        id: Uuid,
        interval: Interval,
        total_price_cents: Option<i64>,
    ) -> SqlxResult<RescheduleOutcome> {
        let mut tables = self.tables.lock();
        let Some(current) = tables.bookings.get(&id).cloned() else {
            return Ok(RescheduleOutcome::NotFound);
        };
        if current.status != BookingStatus::Pending {
            return Ok(RescheduleOutcome::NotPending);
        }

        let existing: Vec<BookingRow> = tables.bookings.values().cloned().collect();
        let blocking = conflicting_bookings(current.field_id, &interval, &existing, Some(id));
        if !blocking.is_empty() {
            return Ok(RescheduleOutcome::Conflict(blocking));
        }

        let Some(booking) = tables.bookings.get_mut(&id) else {
            return Ok(RescheduleOutcome::NotFound);
        };
        booking.booking_date = interval.start;
        booking.booked_until = interval.end;
        booking.total_price_cents = total_price_cents;
        booking.updated_at = Utc::now();
        Ok(RescheduleOutcome::Rescheduled(booking.clone()))
    }

    async fn delete_booking(&self, id: Uuid) -> SqlxResult<bool> {
        Ok(self.tables.lock().bookings.remove(&id).is_some())
    }
}

impl Store for MemoryStore {
    async fn ping(&self) -> SqlxResult<()> {
        Ok(())
    }
}
