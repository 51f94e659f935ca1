use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use infra::models::Role;
use infra::store::Store;

use crate::auth::Principal;
use crate::domains::users::types::{OwnerContacts, SignupOwnerRequest, SignupUserRequest, UserResponse};
use crate::domains::PageQuery;
use crate::error::AppError;
use crate::extract::{AppJson, AppQuery};
use crate::state::AppState;

pub async fn signup_user<S: Store>(
    State(state): State<AppState<S>>,
    AppJson(req): AppJson<SignupUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = state
        .users()
        .signup(Role::User, req.username, req.name, req.password, OwnerContacts::default())
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn signup_owner<S: Store>(
    State(state): State<AppState<S>>,
    AppJson(req): AppJson<SignupOwnerRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let contacts = OwnerContacts {
        email: req.email,
        phone_number: req.phone_number,
        instagram: req.instagram,
    };
    let user = state
        .users()
        .signup(Role::Owner, req.username, req.name, req.password, contacts)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn list_users<S: Store>(
    State(state): State<AppState<S>>,
    principal: Principal,
    AppQuery(query): AppQuery<PageQuery>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.users().list_users(&principal, query.page()).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn list_owners<S: Store>(
    State(state): State<AppState<S>>,
    AppQuery(query): AppQuery<PageQuery>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let owners = state.users().list_owners(query.page()).await?;
    Ok(Json(owners.into_iter().map(UserResponse::from).collect()))
}
