use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use infra::models::{BookingRow, BookingStatus, FieldRow};
use infra::pagination::LimitOffset;
use infra::repos::CreateBooking;
use infra::scheduling::{booked_segments, check_transition, free_segments, Interval, Relation, Segment};
use infra::store::{CreateBookingOutcome, RescheduleOutcome, Store};
use uuid::Uuid;

use crate::auth::Principal;
use crate::config::AppConfig;
use crate::domains::fields::service::field_not_found;
use crate::error::AppError;

pub struct BookingService<S> {
    store: S,
    config: Arc<AppConfig>,
}

fn booking_not_found() -> AppError {
    AppError::NotFound("Booking not found".to_string())
}

fn overlap() -> AppError {
    AppError::Validation("Booking overlaps with another booking".to_string())
}

impl<S: Store> BookingService<S> {
    pub fn new(store: S, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    async fn field(&self, field_id: Uuid) -> Result<FieldRow, AppError> {
        self.store.get_field(field_id).await?.ok_or_else(field_not_found)
    }

    async fn booking(&self, booking_id: Uuid) -> Result<BookingRow, AppError> {
        self.store.get_booking(booking_id).await?.ok_or_else(booking_not_found)
    }

    /// Booking plus the caller's relation to it.
    async fn booking_with_relation(
        &self,
        booking_id: Uuid,
        caller: &Principal,
    ) -> Result<(BookingRow, FieldRow, Relation), AppError> {
        let booking = self.booking(booking_id).await?;
        let field = self.field(booking.field_id).await?;
        let relation = Relation {
            owns_field: field.owner_id == caller.id,
            made_booking: booking.user_id == caller.id,
        };
        Ok((booking, field, relation))
    }

    fn validate_interval(
        &self,
        field: &FieldRow,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Interval, AppError> {
        let interval = Interval::new(start, end).map_err(|e| AppError::Validation(e.to_string()))?;

        if self.config.enforce_operating_hours && !field.operating_window().contains(&interval) {
            return Err(AppError::Validation(format!(
                "Booking must fall within the field's operating hours ({} - {})",
                field.start_time, field.end_time
            )));
        }

        Ok(interval)
    }

    pub async fn create_booking(
        &self,
        caller: &Principal,
        field_id: Uuid,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<BookingRow, AppError> {
        let field = self.field(field_id).await?;
        let interval = self.validate_interval(&field, start, end)?;

        let outcome = self
            .store
            .create_booking(CreateBooking {
                user_id: caller.id,
                field_id,
                interval,
                total_price_cents: field.price_for(&interval),
            })
            .await?;

        match outcome {
            CreateBookingOutcome::Created(booking) => {
                tracing::info!(booking_id = %booking.id, %field_id, user_id = %caller.id, "Booking created");
                Ok(booking)
            }
            CreateBookingOutcome::FieldNotFound => Err(field_not_found()),
            CreateBookingOutcome::Conflict(blocking) => {
                tracing::info!(%field_id, ?blocking, "Booking rejected, slot taken");
                Err(overlap())
            }
        }
    }

    pub async fn list_bookings(&self, caller: &Principal, page: LimitOffset) -> Result<Vec<BookingRow>, AppError> {
        if !caller.is_admin() {
            return Err(AppError::forbidden());
        }
        Ok(self.store.list_bookings(page).await?)
    }

    pub async fn list_user_bookings(&self, caller: &Principal) -> Result<Vec<BookingRow>, AppError> {
        Ok(self.store.list_user_bookings(caller.id).await?)
    }

    pub async fn list_field_bookings(&self, field_id: Uuid, caller: &Principal) -> Result<Vec<BookingRow>, AppError> {
        let field = self.field(field_id).await?;
        if field.owner_id != caller.id && !caller.is_admin() {
            return Err(AppError::forbidden());
        }
        Ok(self.store.list_field_bookings(field_id).await?)
    }

    pub async fn field_availability(&self, field_id: Uuid, date: NaiveDate) -> Result<Vec<Segment>, AppError> {
        let field = self.field(field_id).await?;
        let bookings = self.store.list_field_bookings(field_id).await?;
        Ok(free_segments(field.operating_window(), date, &bookings))
    }

    pub async fn field_booked_segments(&self, field_id: Uuid, date: NaiveDate) -> Result<Vec<Segment>, AppError> {
        let field = self.field(field_id).await?;
        let bookings = self.store.list_field_bookings(field_id).await?;
        Ok(booked_segments(field.operating_window(), date, &bookings))
    }

    pub async fn get_booking(&self, booking_id: Uuid, caller: &Principal) -> Result<BookingRow, AppError> {
        let (booking, _, relation) = self.booking_with_relation(booking_id, caller).await?;
        if !(relation.owns_field || relation.made_booking || caller.is_admin()) {
            return Err(AppError::forbidden());
        }
        Ok(booking)
    }

    pub async fn delete_booking(&self, booking_id: Uuid, caller: &Principal) -> Result<(), AppError> {
        let (_, _, relation) = self.booking_with_relation(booking_id, caller).await?;
        if !(relation.owns_field || relation.made_booking || caller.is_admin()) {
            return Err(AppError::forbidden());
        }

        if !self.store.delete_booking(booking_id).await? {
            return Err(booking_not_found());
        }
        tracing::info!(%booking_id, by = %caller.id, "Booking deleted");
        Ok(())
    }

    pub async fn set_booking_status(
        &self,
        booking_id: Uuid,
        status: &str,
        caller: &Principal,
    ) -> Result<BookingRow, AppError> {
        let next: BookingStatus = status.parse().map_err(AppError::Validation)?;
        let (booking, _, relation) = self.booking_with_relation(booking_id, caller).await?;

        check_transition(booking.status, next, relation).map_err(|e| {
            if e.is_forbidden() {
                AppError::Forbidden(e.to_string())
            } else {
                AppError::Validation(e.to_string())
            }
        })?;

        let updated = self
            .store
            .update_booking_status(booking_id, booking.status, next)
            .await?
            .ok_or_else(|| {
                AppError::Validation("Booking was modified concurrently, retry".to_string())
            })?;

        tracing::info!(%booking_id, from = %booking.status, to = %next, by = %caller.id, "Booking status changed");
        Ok(updated)
    }

    /// Move a pending booking to a new interval, re-running every creation check.
    pub async fn reschedule_booking(
        &self,
        booking_id: Uuid,
        start: NaiveDateTime,
        end: NaiveDateTime,
        caller: &Principal,
    ) -> Result<BookingRow, AppError> {
        let (booking, field, relation) = self.booking_with_relation(booking_id, caller).await?;
        if !(relation.owns_field || relation.made_booking) {
            return Err(AppError::forbidden());
        }
        if booking.status != BookingStatus::Pending {
            return Err(AppError::Validation("Only pending bookings can be rescheduled".to_string()));
        }

        let interval = self.validate_interval(&field, start, end)?;
        let outcome = self
            .store
            .reschedule_booking(booking_id, interval, field.price_for(&interval))
            .await?;

        match outcome {
            RescheduleOutcome::Rescheduled(updated) => {
                tracing::info!(%booking_id, by = %caller.id, "Booking rescheduled");
                Ok(updated)
            }
            RescheduleOutcome::NotFound => Err(booking_not_found()),
            RescheduleOutcome::NotPending => {
                Err(AppError::Validation("Only pending bookings can be rescheduled".to_string()))
            }
            RescheduleOutcome::Conflict(blocking) => {
                tracing::info!(%booking_id, ?blocking, "Reschedule rejected, slot taken");
                Err(overlap())
            }
        }
    }
}
