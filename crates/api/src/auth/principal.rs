use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::request::Parts,
};
use infra::models::{Role, UserRow};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::AppError;

/// The authenticated caller, placed in request extensions by the session middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
}

impl Principal {
    /// Usernames listed in `ADMIN_USERNAMES` are promoted to admin.
    pub fn from_user(user: &UserRow, config: &AppConfig) -> Self {
        let role = if config.is_admin_username(&user.username) {
            Role::Admin
        } else {
            user.role
        };

        Self {
            id: user.id,
            username: user.username.clone(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn can_manage_fields(&self) -> bool {
        matches!(self.role, Role::Owner | Role::Admin)
    }
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or_else(AppError::unauthenticated)
    }
}

impl<S> OptionalFromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<Principal>().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(username: &str, role: Role) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            username: username.to_string(),
            name: "Someone".to_string(),
            password_hash: String::new(),
            role,
            email: None,
            phone_number: None,
            instagram: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn admin_usernames_are_promoted() {
        let config = AppConfig {
            admin_usernames: vec!["root".to_string()],
            ..AppConfig::default()
        };

        assert!(Principal::from_user(&user("root", Role::User), &config).is_admin());
        let owner = Principal::from_user(&user("pitch", Role::Owner), &config);
        assert!(!owner.is_admin());
        assert!(owner.can_manage_fields());
    }
}
