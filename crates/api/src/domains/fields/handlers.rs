use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use infra::pagination::LimitOffset;
use infra::store::Store;
use uuid::Uuid;

use crate::auth::Principal;
use crate::domains::auth::types::MessageResponse;
use crate::domains::fields::types::{CreateFieldRequest, FieldResponse, ListFieldsQuery};
use crate::error::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::state::AppState;

pub async fn create_field<S: Store>(
    State(state): State<AppState<S>>,
    principal: Principal,
    AppJson(req): AppJson<CreateFieldRequest>,
) -> Result<(StatusCode, Json<FieldResponse>), AppError> {
    let field = state.fields().create_field(&principal, req).await?;
    Ok((StatusCode::CREATED, Json(field.into())))
}

pub async fn list_fields<S: Store>(
    State(state): State<AppState<S>>,
    AppQuery(query): AppQuery<ListFieldsQuery>,
) -> Result<Json<Vec<FieldResponse>>, AppError> {
    let page = LimitOffset::new(query.limit, query.offset);
    let fields = state.fields().list_fields(query.owner_id, page).await?;
    Ok(Json(fields.into_iter().map(FieldResponse::from).collect()))
}

pub async fn get_field<S: Store>(
    State(state): State<AppState<S>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<FieldResponse>, AppError> {
    Ok(Json(state.fields().get_field(id).await?.into()))
}

pub async fn delete_field<S: Store>(
    State(state): State<AppState<S>>,
    principal: Principal,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    state.fields().delete_field(id, &principal).await?;
    Ok(Json(MessageResponse::new("Field deleted")))
}
