use tokio::sync::OnceCell;

use crate::error::AppError;

static PLACEHOLDER_HASH: OnceCell<String> = OnceCell::const_new();

pub async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("password hashing task failed: {e}")))?
        .map_err(|e| AppError::Internal(format!("failed to hash password: {e}")))
}

/// A malformed stored hash counts as a mismatch.
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("password check task failed: {e}")))?;

    match outcome {
        Ok(matches) => Ok(matches),
        Err(e) => {
            tracing::warn!("Stored password hash could not be verified: {}", e);
            Ok(false)
        }
    }
}

/// Runs a full bcrypt check against a throwaway hash, so a login for an unknown
/// username takes as long as one with a wrong password.
pub async fn verify_against_placeholder(password: String, cost: u32) -> Result<(), AppError> {
    let hash = PLACEHOLDER_HASH
        .get_or_try_init(|| hash_password("placeholder-password".to_string(), cost))
        .await?;
    verify_password(password, hash.clone()).await?;
    Ok(())
}
