use std::sync::Arc;

use infra::models::{Role, UserRow};
use infra::pagination::LimitOffset;
use infra::repos::CreateUser;
use infra::store::Store;

use crate::auth::password::hash_password;
use crate::auth::Principal;
use crate::config::AppConfig;
use crate::domains::users::types::OwnerContacts;
use crate::error::AppError;

pub const MIN_PASSWORD_LEN: usize = 4;

pub struct UserService<S> {
    store: S,
    config: Arc<AppConfig>,
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn validate_credentials(username: &str, name: &str, password: &str) -> Result<(), AppError> {
    if username.trim().is_empty() {
        return Err(AppError::Validation("username must not be empty".to_string()));
    }
    if name.trim().is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

impl<S: Store> UserService<S> {
    pub fn new(store: S, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    /// Register a principal with `role`. Contacts are dropped for plain users.
    pub async fn signup(
        &self,
        role: Role,
        username: String,
        name: String,
        password: String,
        contacts: OwnerContacts,
    ) -> Result<UserRow, AppError> {
        validate_credentials(&username, &name, &password)?;

        let contacts = if role == Role::Owner {
            contacts
        } else {
            OwnerContacts::default()
        };

        let password_hash = hash_password(password, self.config.bcrypt_cost).await?;
        let created = self
            .store
            .create_user(CreateUser {
                username: username.trim().to_string(),
                name: name.trim().to_string(),
                password_hash,
                role,
                email: blank_to_none(contacts.email),
                phone_number: blank_to_none(contacts.phone_number),
                instagram: blank_to_none(contacts.instagram),
            })
            .await?;

        match created {
            Some(user) => {
                tracing::info!(user_id = %user.id, role = user.role.as_str(), "Principal signed up");
                Ok(user)
            }
            None => Err(AppError::Validation("Username already taken".to_string())),
        }
    }

    pub async fn list_users(&self, caller: &Principal, page: LimitOffset) -> Result<Vec<UserRow>, AppError> {
        if !caller.is_admin() {
            return Err(AppError::forbidden());
        }
        Ok(self.store.list_users(None, page).await?)
    }

    pub async fn list_owners(&self, page: LimitOffset) -> Result<Vec<UserRow>, AppError> {
        Ok(self.store.list_users(Some(Role::Owner), page).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_rules() {
        assert!(validate_credentials("ana", "Ana", "pass").is_ok());
        assert!(validate_credentials(" ", "Ana", "pass").is_err());
        assert!(validate_credentials("ana", "", "pass").is_err());
        assert!(validate_credentials("ana", "Ana", "abc").is_err());
    }

    #[test]
    fn blank_contacts_become_none() {
        assert_eq!(blank_to_none(Some("  ".to_string())), None);
        assert_eq!(blank_to_none(Some(" @pitch ".to_string())), Some("@pitch".to_string()));
    }
}
