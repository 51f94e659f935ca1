use sqlx::PgPool;

pub type Db = PgPool;

/// SQLSTATE raised when a row violates an `EXCLUDE` constraint.
pub const EXCLUSION_VIOLATION: &str = "23P01";

pub fn is_exclusion_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(EXCLUSION_VIOLATION),
        _ => false,
    }
}
