use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::models::{SessionRow, UserRow};

pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    token_hash: &str,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
) -> SqlxResult<SessionRow> {
    sqlx::query_as::<_, SessionRow>(
        r#"
        INSERT INTO sessions (token_hash, user_id, expires_at)
        VALUES ($1, $2, $3)
        RETURNING id, token_hash, user_id, expires_at, created_at
        "#,
    )
    .bind(token_hash)
    .bind(user_id)
    .bind(expires_at)
    .fetch_one(executor)
    .await
}

/// The user behind an unexpired session.
pub async fn find_user_by_token_hash<'e>(
    executor: impl PgExecutor<'e>,
    token_hash: &str,
) -> SqlxResult<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(
        r#"
        SELECT u.id, u.username, u.name, u.password_hash, u.role, u.email, u.phone_number,
               u.instagram, u.created_at, u.updated_at
        FROM sessions s
        INNER JOIN users u ON u.id = s.user_id
        WHERE s.token_hash = $1 AND s.expires_at > NOW()
        "#,
    )
    .bind(token_hash)
    .fetch_optional(executor)
    .await
}

pub async fn delete_by_token_hash<'e>(
    executor: impl PgExecutor<'e>,
    token_hash: &str,
) -> SqlxResult<bool> {
    let result = sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
        .bind(token_hash)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_expired<'e>(executor: impl PgExecutor<'e>) -> SqlxResult<u64> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}
