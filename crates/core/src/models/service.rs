use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Open/close configuration for one weekday as submitted by a host
///
/// Times are `HH:MM:SS` strings. Absent times fall back to the configured
/// service defaults; absent `is_open` means closed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DayHoursInput {
    #[serde(default)]
    pub is_open: bool,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    pub service_name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone_number: String,
    #[serde(default)]
    pub monday: DayHoursInput,
    #[serde(default)]
    pub tuesday: DayHoursInput,
    #[serde(default)]
    pub wednesday: DayHoursInput,
    #[serde(default)]
    pub thursday: DayHoursInput,
    #[serde(default)]
    pub friday: DayHoursInput,
    #[serde(default)]
    pub saturday: DayHoursInput,
    #[serde(default)]
    pub sunday: DayHoursInput,
}

impl CreateServiceRequest {
    /// Weekday entries ordered Monday through Sunday
    pub fn days(&self) -> [&DayHoursInput; 7] {
        [
            &self.monday,
            &self.tuesday,
            &self.wednesday,
            &self.thursday,
            &self.friday,
            &self.saturday,
            &self.sunday,
        ]
    }
}

/// Resolved open/close configuration for one weekday
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceDayHours {
    pub is_open: bool,
    pub open_time: String,
    pub close_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub id: Uuid,
    pub host_id: Uuid,
    pub service_name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone_number: String,
    pub monday: ServiceDayHours,
    pub tuesday: ServiceDayHours,
    pub wednesday: ServiceDayHours,
    pub thursday: ServiceDayHours,
    pub friday: ServiceDayHours,
    pub saturday: ServiceDayHours,
    pub sunday: ServiceDayHours,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
