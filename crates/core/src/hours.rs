//! # Weekly Hours & Admissibility
//!
//! A service's recurring hours are seven [`DayHours`] entries, one per ISO
//! weekday. [`check_admissible`] decides whether a candidate appointment
//! interval lies entirely within those hours.
//!
//! The check runs in three phases because the constraint differs for the
//! first day, the days strictly in between, and the last day of a possibly
//! multi-day interval:
//!
//! 1. The start day must be open and contain the start time.
//! 2. Every day strictly between the start and end dates is occupied in its
//!    entirety, so the service must be open with no hour restriction on it
//!    (open at [`DayBounds::min_time`], close at [`DayBounds::max_time`]).
//! 3. The end day must be open and contain the end time.
//!
//! All three phases reject with the same [`BookingError::InvalidAppointmentTime`];
//! callers are not told which phase failed.

use chrono::{Datelike, Duration, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};
use crate::models::appointment::CandidateInterval;

/// Open/close configuration for a single weekday
///
/// No ordering between `open_time` and `close_time` is enforced; the
/// admissibility check compares against both literally, so a day configured
/// with `open_time > close_time` rejects every time on that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub is_open: bool,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
}

/// A service's recurring hours, one entry per ISO weekday (Mon..Sun)
///
/// Every weekday always has a value. A schedule is read fresh from storage
/// for each booking attempt and is immutable for the duration of the check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    days: [DayHours; 7],
}

impl WeeklySchedule {
    /// Builds a schedule from seven entries ordered Monday through Sunday
    pub fn new(days: [DayHours; 7]) -> Self {
        Self { days }
    }

    pub fn day(&self, weekday: Weekday) -> &DayHours {
        &self.days[weekday.num_days_from_monday() as usize]
    }

    pub fn is_open_on(&self, weekday: Weekday) -> bool {
        self.day(weekday).is_open
    }

    pub fn open_time(&self, weekday: Weekday) -> NaiveTime {
        self.day(weekday).open_time
    }

    pub fn close_time(&self, weekday: Weekday) -> NaiveTime {
        self.day(weekday).close_time
    }
}

/// The absolute first and last times of day (00:00:00 and 23:59:59)
///
/// A weekday whose hours equal these bounds is "fully open all day", the
/// requirement for any day an appointment spans in its entirety. The bounds
/// are parsed from configuration at startup and passed in explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBounds {
    pub min_time: NaiveTime,
    pub max_time: NaiveTime,
}

impl DayBounds {
    pub fn new(min_time: NaiveTime, max_time: NaiveTime) -> Self {
        Self { min_time, max_time }
    }

    /// Whether a weekday is open with no hour restriction at all
    pub fn is_fully_open(&self, hours: &DayHours) -> bool {
        hours.is_open && hours.open_time == self.min_time && hours.close_time == self.max_time
    }
}

/// Checks that a candidate interval lies entirely within open hours
///
/// Walks every calendar day the interval touches. The walk over the
/// strictly-between days is O(days), not O(distinct weekdays); a span much
/// longer than a week re-tests weekdays it has already seen. Deduplicating
/// to at most seven weekdays would be an equivalent optimization, but the
/// linear walk is the baseline and keeps room for per-date exceptions such
/// as holidays later.
pub fn check_admissible(
    schedule: &WeeklySchedule,
    bounds: &DayBounds,
    interval: &CandidateInterval,
) -> BookingResult<()> {
    let starts_at = interval.starts_at;
    let ends_at = interval.ends_at;

    // start day: open, and the start time within its hours
    let mut date_in_check = starts_at.date();
    let day = schedule.day(date_in_check.weekday());
    if !day.is_open || starts_at.time() < day.open_time || starts_at.time() > day.close_time {
        return Err(BookingError::InvalidAppointmentTime);
    }

    // days strictly in between: occupied in their entirety, so they must be
    // fully open (e.g. a hotel-style booking spanning nights)
    if starts_at.date() != ends_at.date() {
        date_in_check += Duration::days(1);
        while date_in_check < ends_at.date() {
            if !bounds.is_fully_open(schedule.day(date_in_check.weekday())) {
                return Err(BookingError::InvalidAppointmentTime);
            }
            date_in_check += Duration::days(1);
        }
    }

    // end day: open, and the end time within its hours. For a single-day
    // interval date_in_check is still the start date, so this re-tests the
    // same day against the end time.
    let day = schedule.day(date_in_check.weekday());
    if !day.is_open || ends_at.time() < day.open_time || ends_at.time() > day.close_time {
        return Err(BookingError::InvalidAppointmentTime);
    }

    Ok(())
}
