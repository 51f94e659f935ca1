use chrono::NaiveDateTime;
use infra::models::{BookingRow, BookingStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub field_id: Uuid,
    pub booking_date: NaiveDateTime,
    pub booked_until: NaiveDateTime,
}

/// Status arrives as a raw string so unknown values surface as a validation error.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct RescheduleRequest {
    pub booking_date: NaiveDateTime,
    pub booked_until: NaiveDateTime,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub field_id: Uuid,
    pub booking_date: NaiveDateTime,
    pub booked_until: NaiveDateTime,
    pub status: BookingStatus,
    /// In cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<i64>,
}

impl From<BookingRow> for BookingResponse {
    fn from(row: BookingRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            field_id: row.field_id,
            booking_date: row.booking_date,
            booked_until: row.booked_until,
            status: row.status,
            total_price: row.total_price_cents,
        }
    }
}
