use bookable_core::errors::BookingResult;
use bookable_core::hours::{DayHours, WeeklySchedule};
use bookable_core::timefmt::TimeFormats;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Service row; open/close times are stored as `HH:MM:SS` text, one column
/// triple per weekday, matching the canonical time-of-day format.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub host_id: Uuid,
    pub service_name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone_number: String,
    pub is_open_mo: bool,
    pub is_open_tu: bool,
    pub is_open_we: bool,
    pub is_open_th: bool,
    pub is_open_fr: bool,
    pub is_open_sa: bool,
    pub is_open_su: bool,
    pub open_time_mo: String,
    pub open_time_tu: String,
    pub open_time_we: String,
    pub open_time_th: String,
    pub open_time_fr: String,
    pub open_time_sa: String,
    pub open_time_su: String,
    pub close_time_mo: String,
    pub close_time_tu: String,
    pub close_time_we: String,
    pub close_time_th: String,
    pub close_time_fr: String,
    pub close_time_sa: String,
    pub close_time_su: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl DbService {
    /// Per-weekday (is_open, open_time, close_time) triples, Monday first
    pub fn day_columns(&self) -> [(bool, &str, &str); 7] {
        [
            (self.is_open_mo, &self.open_time_mo, &self.close_time_mo),
            (self.is_open_tu, &self.open_time_tu, &self.close_time_tu),
            (self.is_open_we, &self.open_time_we, &self.close_time_we),
            (self.is_open_th, &self.open_time_th, &self.close_time_th),
            (self.is_open_fr, &self.open_time_fr, &self.close_time_fr),
            (self.is_open_sa, &self.open_time_sa, &self.close_time_sa),
            (self.is_open_su, &self.open_time_su, &self.close_time_su),
        ]
    }

    /// Parses the stored hour columns into the domain schedule
    ///
    /// An unparseable column means the stored configuration is corrupt; the
    /// request carrying it fails with a malformed-input error.
    pub fn weekly_schedule(&self, formats: &TimeFormats) -> BookingResult<WeeklySchedule> {
        let columns = self.day_columns();
        let mut days = Vec::with_capacity(7);
        for (is_open, open, close) in columns {
            days.push(DayHours {
                is_open,
                open_time: formats.parse_time(open)?,
                close_time: formats.parse_time(close)?,
            });
        }
        // length is exactly 7 by construction
        let days: [DayHours; 7] = days
            .try_into()
            .unwrap_or_else(|_| unreachable!("seven weekday columns"));
        Ok(WeeklySchedule::new(days))
    }
}

/// Column values for a service insert; hour times already resolved to
/// `HH:MM:SS` text (request values or configured defaults).
#[derive(Debug, Clone)]
pub struct NewService {
    pub service_name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone_number: String,
    /// (is_open, open_time, close_time) per weekday, Monday first
    pub days: [(bool, String, String); 7],
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbApptType {
    pub id: Uuid,
    pub service_id: Uuid,
    pub appt_type_name: String,
    pub appt_duration_minutes: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppt {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_id: Uuid,
    pub appt_type_name: String,
    pub appt_starts_at: NaiveDateTime,
    pub appt_ends_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
