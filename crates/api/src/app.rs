use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{
        header::{HeaderValue, CONTENT_TYPE},
        Method, StatusCode,
    },
    middleware,
    routing::{get, post, put},
    Router,
};
use infra::store::Store;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::domains::{auth, fields, users};
use crate::error::AppError;
use crate::middleware::session::session_middleware;
use crate::state::AppState;

/// Signup and login, optionally rate limited per client IP.
fn credential_routes<S: Store>(rate_limit: bool) -> Router<AppState<S>> {
    let routes = Router::new()
        .route("/users/signup", post(users::handlers::signup_user::<S>))
        .route("/owners/signup", post(users::handlers::signup_owner::<S>))
        .route("/auth/login", post(auth::handlers::login::<S>));

    if !rate_limit {
        return routes;
    }

    // 1 token every 6 seconds with a burst of 10, roughly 10 attempts a minute
    match GovernorConfigBuilder::default().per_second(6).burst_size(10).finish() {
        Some(conf) => routes.layer(GovernorLayer::new(Arc::new(conf))),
        None => {
            tracing::warn!("Invalid rate limit configuration, auth routes are not rate limited");
            routes
        }
    }
}

fn booking_routes<S: Store>() -> Router<AppState<S>> {
    use crate::domains::bookings::handlers::*;

    Router::new()
        .route("/bookings", post(create_booking::<S>).get(list_bookings::<S>))
        .route("/bookings/user", get(list_user_bookings::<S>))
        .route("/bookings/field/{field_id}", get(list_field_bookings::<S>))
        .route(
            "/bookings/field/{field_id}/availability/{date}",
            get(field_availability::<S>),
        )
        .route(
            "/bookings/field/{field_id}/booked/{date}",
            get(field_booked_segments::<S>),
        )
        .route(
            "/bookings/{id}",
            get(get_booking::<S>)
                .put(update_booking_status::<S>)
                .delete(delete_booking::<S>),
        )
        .route("/bookings/{id}/interval", put(reschedule_booking::<S>))
}

pub fn build_router<S: Store>(state: AppState<S>) -> Router {
    let config = state.config().clone();

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    Router::new()
        // Liveness plus a store round-trip.
        .route("/health", get(health::<S>))
        .merge(credential_routes::<S>(config.rate_limit_auth))
        .route("/auth/logout", post(auth::handlers::logout::<S>))
        .route("/auth/me", get(auth::handlers::me::<S>))
        .route("/users", get(users::handlers::list_users::<S>))
        .route("/owners", get(users::handlers::list_owners::<S>))
        .route(
            "/fields",
            post(fields::handlers::create_field::<S>).get(fields::handlers::list_fields::<S>),
        )
        .route(
            "/fields/{id}",
            get(fields::handlers::get_field::<S>).delete(fields::handlers::delete_field::<S>),
        )
        .merge(booking_routes::<S>())
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(state, session_middleware::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([CONTENT_TYPE])
                .allow_credentials(true),
        )
}

async fn health<S: Store>(State(state): State<AppState<S>>) -> Result<&'static str, AppError> {
    state.store.ping().await?;
    Ok("ok")
}
