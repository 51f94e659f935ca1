use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use infra::scheduling::Segment;
use infra::store::Store;
use uuid::Uuid;

use crate::auth::Principal;
use crate::domains::auth::types::MessageResponse;
use crate::domains::bookings::types::{
    BookingResponse, CreateBookingRequest, RescheduleRequest, UpdateStatusRequest,
};
use crate::domains::PageQuery;
use crate::error::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::state::AppState;

fn to_responses(rows: Vec<infra::models::BookingRow>) -> Json<Vec<BookingResponse>> {
    Json(rows.into_iter().map(BookingResponse::from).collect())
}

pub async fn create_booking<S: Store>(
    State(state): State<AppState<S>>,
    principal: Principal,
    AppJson(req): AppJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let booking = state
        .bookings()
        .create_booking(&principal, req.field_id, req.booking_date, req.booked_until)
        .await?;

    Ok((StatusCode::CREATED, Json(booking.into())))
}

pub async fn list_bookings<S: Store>(
    State(state): State<AppState<S>>,
    principal: Principal,
    AppQuery(query): AppQuery<PageQuery>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let rows = state.bookings().list_bookings(&principal, query.page()).await?;
    Ok(to_responses(rows))
}

pub async fn list_user_bookings<S: Store>(
    State(state): State<AppState<S>>,
    principal: Principal,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let rows = state.bookings().list_user_bookings(&principal).await?;
    Ok(to_responses(rows))
}

pub async fn list_field_bookings<S: Store>(
    State(state): State<AppState<S>>,
    principal: Principal,
    AppPath(field_id): AppPath<Uuid>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let rows = state.bookings().list_field_bookings(field_id, &principal).await?;
    Ok(to_responses(rows))
}

pub async fn field_availability<S: Store>(
    State(state): State<AppState<S>>,
    AppPath((field_id, date)): AppPath<(Uuid, NaiveDate)>,
) -> Result<Json<Vec<Segment>>, AppError> {
    Ok(Json(state.bookings().field_availability(field_id, date).await?))
}

pub async fn field_booked_segments<S: Store>(
    State(state): State<AppState<S>>,
    AppPath((field_id, date)): AppPath<(Uuid, NaiveDate)>,
) -> Result<Json<Vec<Segment>>, AppError> {
    Ok(Json(state.bookings().field_booked_segments(field_id, date).await?))
}

pub async fn get_booking<S: Store>(
    State(state): State<AppState<S>>,
    principal: Principal,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<BookingResponse>, AppError> {
    Ok(Json(state.bookings().get_booking(id, &principal).await?.into()))
}

pub async fn update_booking_status<S: Store>(
    State(state): State<AppState<S>>,
    principal: Principal,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<UpdateStatusRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state
        .bookings()
        .set_booking_status(id, &req.status, &principal)
        .await?;
    Ok(Json(booking.into()))
}

pub async fn reschedule_booking<S: Store>(
    State(state): State<AppState<S>>,
    principal: Principal,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<RescheduleRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state
        .bookings()
        .reschedule_booking(id, req.booking_date, req.booked_until, &principal)
        .await?;
    Ok(Json(booking.into()))
}

pub async fn delete_booking<S: Store>(
    State(state): State<AppState<S>>,
    principal: Principal,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    state.bookings().delete_booking(id, &principal).await?;
    Ok(Json(MessageResponse::new("Booking deleted")))
}
