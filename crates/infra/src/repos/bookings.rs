use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::{
    models::{BookingRow, BookingStatus},
    pagination::LimitOffset,
    scheduling::Interval,
};

#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub user_id: Uuid,
    pub field_id: Uuid,
    pub interval: Interval,
    pub total_price_cents: Option<i64>,
}

pub async fn create<'e>(executor: impl PgExecutor<'e>, data: CreateBooking) -> SqlxResult<BookingRow> {
    sqlx::query_as::<_, BookingRow>(
        r#"
        INSERT INTO bookings (user_id, field_id, booking_date, booked_until, total_price_cents)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, field_id, booking_date, booked_until, status,
                  total_price_cents, created_at, updated_at
        "#,
    )
    .bind(data.user_id)
    .bind(data.field_id)
    .bind(data.interval.start)
    .bind(data.interval.end)
    .bind(data.total_price_cents)
    .fetch_one(executor)
    .await
}

pub async fn get_by_id<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> SqlxResult<Option<BookingRow>> {
    sqlx::query_as::<_, BookingRow>(
        r#"
        SELECT id, user_id, field_id, booking_date, booked_until, status,
               total_price_cents, created_at, updated_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn list<'e>(executor: impl PgExecutor<'e>, page: LimitOffset) -> SqlxResult<Vec<BookingRow>> {
    sqlx::query_as::<_, BookingRow>(
        r#"
        SELECT id, user_id, field_id, booking_date, booked_until, status,
               total_price_cents, created_at, updated_at
        FROM bookings
        ORDER BY booking_date ASC, id ASC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(page.limit)
    .bind(page.offset)
    .fetch_all(executor)
    .await
}

pub async fn list_by_user<'e>(executor: impl PgExecutor<'e>, user_id: Uuid) -> SqlxResult<Vec<BookingRow>> {
    sqlx::query_as::<_, BookingRow>(
        r#"
        SELECT id, user_id, field_id, booking_date, booked_until, status,
               total_price_cents, created_at, updated_at
        FROM bookings
        WHERE user_id = $1
        ORDER BY booking_date ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}

pub async fn list_by_field<'e>(executor: impl PgExecutor<'e>, field_id: Uuid) -> SqlxResult<Vec<BookingRow>> {
    sqlx::query_as::<_, BookingRow>(
        r#"
        SELECT id, user_id, field_id, booking_date, booked_until, status,
               total_price_cents, created_at, updated_at
        FROM bookings
        WHERE field_id = $1
        ORDER BY booking_date ASC
        "#,
    )
    .bind(field_id)
    .fetch_all(executor)
    .await
}

/// Every booking that still holds its slot on the field.
pub async fn list_active_by_field<'e>(
    executor: impl PgExecutor<'e>,
    field_id: Uuid,
) -> SqlxResult<Vec<BookingRow>> {
    sqlx::query_as::<_, BookingRow>(
        r#"
        SELECT id, user_id, field_id, booking_date, booked_until, status,
               total_price_cents, created_at, updated_at
        FROM bookings
        WHERE field_id = $1 AND status <> 'canceled'
        ORDER BY booking_date ASC
        "#,
    )
    .bind(field_id)
    .fetch_all(executor)
    .await
}

/// Compare-and-set on the status. `None` when the booking is gone or its
/// status is no longer `expected`.
pub async fn update_status<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    expected: BookingStatus,
    next: BookingStatus,
) -> SqlxResult<Option<BookingRow>> {
    sqlx::query_as::<_, BookingRow>(
        r#"
        UPDATE bookings
        SET status = $3, updated_at = NOW()
        WHERE id = $1 AND status = $2
        RETURNING id, user_id, field_id, booking_date, booked_until, status,
                  total_price_cents, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(expected)
    .bind(next)
    .fetch_optional(executor)
    .await
}

/// Moves a pending booking. `None` when it is gone or no longer pending.
pub async fn update_interval<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    interval: Interval,
    total_price_cents: Option<i64>,
) -> SqlxResult<Option<BookingRow>> {
    sqlx::query_as::<_, BookingRow>(
        r#"
        UPDATE bookings
        SET booking_date = $2, booked_until = $3, total_price_cents = $4, updated_at = NOW()
        WHERE id = $1 AND status = 'pending'
        RETURNING id, user_id, field_id, booking_date, booked_until, status,
                  total_price_cents, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(interval.start)
    .bind(interval.end)
    .bind(total_price_cents)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> SqlxResult<bool> {
    let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}
