use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateApptTypeRequest {
    pub appt_type_name: String,
    pub appt_duration_minutes: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApptTypeResponse {
    pub id: Uuid,
    pub service_id: Uuid,
    pub appt_type_name: String,
    pub appt_duration_minutes: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
