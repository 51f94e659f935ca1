use infra::models::{FieldRow, MAX_HOURLY_RATE_CENTS};
use infra::pagination::LimitOffset;
use infra::repos::CreateField;
use infra::store::Store;
use uuid::Uuid;

use crate::auth::Principal;
use crate::domains::fields::types::CreateFieldRequest;
use crate::error::AppError;

pub struct FieldService<S> {
    store: S,
}

pub fn field_not_found() -> AppError {
    AppError::NotFound("Field not found".to_string())
}

fn validate(req: &CreateFieldRequest) -> Result<(), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }
    if req.location.trim().is_empty() {
        return Err(AppError::Validation("location must not be empty".to_string()));
    }
    if !(req.width > 0.0 && req.height > 0.0) {
        return Err(AppError::Validation("width and height must be positive".to_string()));
    }
    if req.hourly_rate.is_some_and(|rate| rate < 0) {
        return Err(AppError::Validation("hourly_rate must not be negative".to_string()));
    }
    if req.hourly_rate.is_some_and(|rate| rate > MAX_HOURLY_RATE_CENTS) {
        return Err(AppError::Validation(format!(
            "hourly_rate must not exceed {MAX_HOURLY_RATE_CENTS}"
        )));
    }
    if req.start_time >= req.end_time {
        return Err(AppError::Validation("start_time must be before end_time".to_string()));
    }
    Ok(())
}

impl<S: Store> FieldService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create_field(&self, caller: &Principal, req: CreateFieldRequest) -> Result<FieldRow, AppError> {
        if !caller.can_manage_fields() {
            return Err(AppError::Forbidden("Only owners can create fields".to_string()));
        }
        validate(&req)?;

        let field = self
            .store
            .create_field(CreateField {
                owner_id: caller.id,
                name: req.name.trim().to_string(),
                location: req.location.trim().to_string(),
                surface_type: req.surface_type.filter(|s| !s.trim().is_empty()),
                width: req.width,
                height: req.height,
                hourly_rate_cents: req.hourly_rate,
                start_time: req.start_time,
                end_time: req.end_time,
            })
            .await?;

        tracing::info!(field_id = %field.id, owner_id = %field.owner_id, "Field created");
        Ok(field)
    }

    pub async fn list_fields(&self, owner_id: Option<Uuid>, page: LimitOffset) -> Result<Vec<FieldRow>, AppError> {
        Ok(self.store.list_fields(owner_id, page).await?)
    }

    pub async fn get_field(&self, id: Uuid) -> Result<FieldRow, AppError> {
        self.store.get_field(id).await?.ok_or_else(field_not_found)
    }

    /// Removes the field together with its bookings.
    pub async fn delete_field(&self, id: Uuid, caller: &Principal) -> Result<(), AppError> {
        let field = self.get_field(id).await?;
        if field.owner_id != caller.id && !caller.is_admin() {
            return Err(AppError::forbidden());
        }

        if !self.store.delete_field(id).await? {
            return Err(field_not_found());
        }
        tracing::info!(field_id = %id, "Field deleted");
        Ok(())
    }
}
