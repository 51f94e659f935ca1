use infra::models::{Role, UserRow};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct SignupUserRequest {
    pub username: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupOwnerRequest {
    pub username: String,
    pub name: String,
    pub password: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub instagram: Option<String>,
}

/// Contact fields an owner may publish. Plain users never carry any.
#[derive(Debug, Default)]
pub struct OwnerContacts {
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub instagram: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            name: row.name,
            role: row.role,
            email: row.email,
            phone_number: row.phone_number,
            instagram: row.instagram,
        }
    }
}
