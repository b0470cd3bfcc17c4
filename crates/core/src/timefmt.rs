//! # Canonical Time Formats
//!
//! All date-times crossing the API boundary use `YYYY-MM-DD HH:MM:SS` and all
//! times of day use `HH:MM:SS`. The formats are carried as an explicit value
//! constructed from configuration and passed to the components that need
//! them; there is no process-wide default.
//!
//! Parse failures surface as [`BookingError::MalformedInput`], which is a
//! configuration/input error distinct from a scheduling rejection.

use chrono::{NaiveDateTime, NaiveTime};

use crate::errors::{BookingError, BookingResult};

/// strftime format for date-time values exchanged with clients
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// strftime format for time-of-day values (service open/close columns)
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

/// Fixed textual formats for date-times and times of day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeFormats {
    datetime: String,
    time: String,
}

impl TimeFormats {
    pub fn new(datetime: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            datetime: datetime.into(),
            time: time.into(),
        }
    }

    pub fn parse_datetime(&self, value: &str) -> BookingResult<NaiveDateTime> {
        NaiveDateTime::parse_from_str(value, &self.datetime).map_err(|_| {
            BookingError::MalformedInput(format!(
                "expected date-time in format {}, got {value:?}",
                self.datetime
            ))
        })
    }

    pub fn parse_time(&self, value: &str) -> BookingResult<NaiveTime> {
        NaiveTime::parse_from_str(value, &self.time).map_err(|_| {
            BookingError::MalformedInput(format!(
                "expected time of day in format {}, got {value:?}",
                self.time
            ))
        })
    }

    pub fn format_datetime(&self, value: NaiveDateTime) -> String {
        value.format(&self.datetime).to_string()
    }

    pub fn format_time(&self, value: NaiveTime) -> String {
        value.format(&self.time).to_string()
    }
}

impl Default for TimeFormats {
    fn default() -> Self {
        Self::new(DEFAULT_DATETIME_FORMAT, DEFAULT_TIME_FORMAT)
    }
}
