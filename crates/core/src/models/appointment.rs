use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

/// Booking request; `appt_starts_at` is a `YYYY-MM-DD HH:MM:SS` string and
/// is parsed before any interval computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateApptRequest {
    pub service_id: Uuid,
    pub appt_type_name: String,
    pub appt_starts_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApptResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_id: Uuid,
    pub appt_type_name: String,
    pub appt_starts_at: String,
    pub appt_ends_at: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// The interval a requested appointment would occupy
///
/// Transient value built per booking attempt; never persisted until both the
/// admissibility and conflict checks pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateInterval {
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
}

impl CandidateInterval {
    /// End instant is start plus the appointment type's fixed duration
    ///
    /// Rejects a start so far in the future that the end instant is not
    /// representable, rather than overflowing.
    pub fn from_start(starts_at: NaiveDateTime, duration_minutes: i32) -> BookingResult<Self> {
        let ends_at = starts_at
            .checked_add_signed(Duration::minutes(i64::from(duration_minutes)))
            .ok_or(BookingError::InvalidAppointmentTime)?;

        Ok(Self { starts_at, ends_at })
    }
}
