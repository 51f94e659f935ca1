use chrono::{Duration, Utc};
use infra::store::Store;
use rand::distr::Alphanumeric;
use rand::RngExt;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::auth::Principal;
use crate::config::AppConfig;
use crate::error::AppError;

const TOKEN_LEN: usize = 64;

pub fn generate_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

pub fn hash_token(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Store a fresh session for `user_id` and return the raw token for the cookie.
pub async fn open_session<S: Store>(
    store: &S,
    config: &AppConfig,
    user_id: Uuid,
) -> Result<String, AppError> {
    let raw_token = generate_token();
    let expires_at = Utc::now() + Duration::hours(config.session_ttl_hours);

    store
        .create_session(&hash_token(&raw_token), user_id, expires_at)
        .await?;

    Ok(raw_token)
}

pub async fn resolve_session<S: Store>(
    store: &S,
    config: &AppConfig,
    raw_token: &str,
) -> Result<Option<Principal>, AppError> {
    let user = store.find_session_user(&hash_token(raw_token)).await?;
    Ok(user.map(|u| Principal::from_user(&u, config)))
}

pub async fn close_session<S: Store>(store: &S, raw_token: &str) -> Result<bool, AppError> {
    Ok(store.delete_session(&hash_token(raw_token)).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_long_and_distinct() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), TOKEN_LEN);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn hash_is_hex_sha256() {
        assert_eq!(
            hash_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
