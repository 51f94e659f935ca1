use chrono::NaiveTime;
use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::{models::FieldRow, pagination::LimitOffset};

#[derive(Debug, Clone)]
pub struct CreateField {
    pub owner_id: Uuid,
    pub name: String,
    pub location: String,
    pub surface_type: Option<String>,
    pub width: f64,
    pub height: f64,
    pub hourly_rate_cents: Option<i64>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

pub async fn create<'e>(executor: impl PgExecutor<'e>, data: CreateField) -> SqlxResult<FieldRow> {
    sqlx::query_as::<_, FieldRow>(
        r#"
        INSERT INTO football_fields (
            owner_id, name, location, surface_type, width, height,
            hourly_rate_cents, start_time, end_time
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, owner_id, name, location, surface_type, width, height,
                  hourly_rate_cents, start_time, end_time, created_at, updated_at
        "#,
    )
    .bind(data.owner_id)
    .bind(&data.name)
    .bind(&data.location)
    .bind(&data.surface_type)
    .bind(data.width)
    .bind(data.height)
    .bind(data.hourly_rate_cents)
    .bind(data.start_time)
    .bind(data.end_time)
    .fetch_one(executor)
    .await
}

pub async fn get_by_id<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> SqlxResult<Option<FieldRow>> {
    sqlx::query_as::<_, FieldRow>(
        r#"
        SELECT id, owner_id, name, location, surface_type, width, height,
               hourly_rate_cents, start_time, end_time, created_at, updated_at
        FROM football_fields
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Row-locks the field for the rest of the transaction. Booking writers take
/// this lock so their overlap check and write cannot interleave.
pub async fn get_for_update<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
) -> SqlxResult<Option<FieldRow>> {
    sqlx::query_as::<_, FieldRow>(
        r#"
        SELECT id, owner_id, name, location, surface_type, width, height,
               hourly_rate_cents, start_time, end_time, created_at, updated_at
        FROM football_fields
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn list<'e>(
    executor: impl PgExecutor<'e>,
    owner_id: Option<Uuid>,
    page: LimitOffset,
) -> SqlxResult<Vec<FieldRow>> {
    sqlx::query_as::<_, FieldRow>(
        r#"
        SELECT id, owner_id, name, location, surface_type, width, height,
               hourly_rate_cents, start_time, end_time, created_at, updated_at
        FROM football_fields
        WHERE ($1::uuid IS NULL OR owner_id = $1)
        ORDER BY name ASC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(owner_id)
    .bind(page.limit)
    .bind(page.offset)
    .fetch_all(executor)
    .await
}

pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> SqlxResult<bool> {
    let result = sqlx::query("DELETE FROM football_fields WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}
