use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::Response,
};
use infra::store::Store;

use crate::auth::cookie::extract_session_id;
use crate::auth::{session, Principal};
use crate::error::AppError;
use crate::state::AppState;

/// Resolves the `session_id` cookie and adds the caller's [`Principal`] to the
/// request extensions. Unknown or expired sessions are ignored; handlers that
/// need a principal reject the request themselves.
pub async fn session_middleware<S: Store>(
    State(state): State<AppState<S>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let raw_token = request
        .headers()
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(extract_session_id);

    if let Some(raw_token) = raw_token {
        match session::resolve_session(&state.store, state.config(), &raw_token).await? {
            Some(principal) => {
                request.extensions_mut().insert::<Principal>(principal);
            }
            None => tracing::debug!("Ignoring unknown or expired session cookie"),
        }
    }

    Ok(next.run(request).await)
}
