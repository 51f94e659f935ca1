use axum::{
    extract::{Request, State},
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderValue,
    },
    response::{IntoResponse, Response},
    Json,
};
use infra::store::Store;

use crate::auth::cookie::{build_clear_cookie, build_session_cookie, extract_session_id};
use crate::auth::password::{verify_against_placeholder, verify_password};
use crate::auth::{session, Principal};
use crate::domains::auth::types::{LoginRequest, MessageResponse};
use crate::domains::users::types::UserResponse;
use crate::error::AppError;
use crate::extract::AppJson;
use crate::state::AppState;

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid username or password".to_string())
}

fn cookie_header(value: String) -> Result<HeaderValue, AppError> {
    value
        .parse()
        .map_err(|_| AppError::Internal("Failed to build cookie header".to_string()))
}

pub async fn login<S: Store>(
    State(state): State<AppState<S>>,
    current: Option<Principal>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Response, AppError> {
    if current.is_some() {
        return Err(AppError::Unauthorized("Already logged in".to_string()));
    }

    let Some(user) = state.store.get_user_by_username(req.username.trim()).await? else {
        verify_against_placeholder(req.password, state.config().bcrypt_cost).await?;
        tracing::info!("Rejected login for unknown username");
        return Err(invalid_credentials());
    };

    if !verify_password(req.password, user.password_hash.clone()).await? {
        tracing::info!(username = %user.username, "Rejected login with wrong password");
        return Err(invalid_credentials());
    }

    let config = state.config();
    let raw_token = session::open_session(&state.store, config, user.id).await?;
    tracing::info!(user_id = %user.id, "Login succeeded");

    let cookie = build_session_cookie(
        &raw_token,
        config.session_ttl_secs(),
        &config.cookie_domain,
        config.cookie_secure,
    );

    let mut response = Json(UserResponse::from(user)).into_response();
    response.headers_mut().insert(SET_COOKIE, cookie_header(cookie)?);
    Ok(response)
}

pub async fn logout<S: Store>(
    State(state): State<AppState<S>>,
    req: Request,
) -> Result<Response, AppError> {
    let raw_token = req
        .headers()
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(extract_session_id)
        .ok_or_else(|| AppError::Unauthorized("Not logged in".to_string()))?;

    if !session::close_session(&state.store, &raw_token).await? {
        tracing::debug!("Logout for a session that no longer exists");
    }

    let config = state.config();
    let cookie = build_clear_cookie(&config.cookie_domain, config.cookie_secure);

    let mut response = Json(MessageResponse::new("Logged out")).into_response();
    response.headers_mut().insert(SET_COOKIE, cookie_header(cookie)?);
    Ok(response)
}

pub async fn me<S: Store>(
    State(state): State<AppState<S>>,
    principal: Principal,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .store
        .get_user(principal.id)
        .await?
        .ok_or_else(AppError::unauthenticated)?;

    let mut response = UserResponse::from(user);
    response.role = principal.role;
    Ok(Json(response))
}
