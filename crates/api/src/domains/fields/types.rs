use chrono::NaiveTime;
use infra::models::FieldRow;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateFieldRequest {
    pub name: String,
    pub location: String,
    pub surface_type: Option<String>,
    pub width: f64,
    pub height: f64,
    /// Price per hour in cents.
    pub hourly_rate: Option<i64>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListFieldsQuery {
    pub owner_id: Option<Uuid>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FieldResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_type: Option<String>,
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<i64>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl From<FieldRow> for FieldResponse {
    fn from(row: FieldRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            location: row.location,
            surface_type: row.surface_type,
            width: row.width,
            height: row.height,
            hourly_rate: row.hourly_rate_cents,
            start_time: row.start_time,
            end_time: row.end_time,
        }
    }
}
