use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::{
    models::{Role, UserRow},
    pagination::LimitOffset,
};

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub name: String,
    pub password_hash: String,
    pub role: Role,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub instagram: Option<String>,
}

/// Insert a principal. Returns `None` when the username is already taken.
pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    data: CreateUser,
) -> SqlxResult<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (username, name, password_hash, role, email, phone_number, instagram)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (username) DO NOTHING
        RETURNING id, username, name, password_hash, role, email, phone_number, instagram, created_at, updated_at
        "#,
    )
    .bind(&data.username)
    .bind(&data.name)
    .bind(&data.password_hash)
    .bind(data.role)
    .bind(&data.email)
    .bind(&data.phone_number)
    .bind(&data.instagram)
    .fetch_optional(executor)
    .await
}

pub async fn get_by_id<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> SqlxResult<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, username, name, password_hash, role, email, phone_number, instagram, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn get_by_username<'e>(
    executor: impl PgExecutor<'e>,
    username: &str,
) -> SqlxResult<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, username, name, password_hash, role, email, phone_number, instagram, created_at, updated_at
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(executor)
    .await
}

pub async fn list<'e>(
    executor: impl PgExecutor<'e>,
    role: Option<Role>,
    page: LimitOffset,
) -> SqlxResult<Vec<UserRow>> {
    sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, username, name, password_hash, role, email, phone_number, instagram, created_at, updated_at
        FROM users
        WHERE ($1::user_role IS NULL OR role = $1)
        ORDER BY username ASC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(role)
    .bind(page.limit)
    .bind(page.offset)
    .fetch_all(executor)
    .await
}
