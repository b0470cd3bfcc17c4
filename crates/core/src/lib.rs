//! # Bookable Core
//!
//! Domain types and booking logic shared by the API and database crates.
//!
//! The heart of this crate is the admissibility check in [`hours`]: given a
//! service's weekly open/close schedule and a candidate appointment interval,
//! decide whether the interval lies entirely within open hours, day by day.
//! Conflict detection against existing appointments and persistence live in
//! the database crate; the API crate composes the three.

/// Error taxonomy for booking and the supporting API surface
pub mod errors;
/// Weekly schedules and the appointment admissibility check
pub mod hours;
/// Request, response, and domain models
pub mod models;
/// Fixed-format parsing and formatting of dates and times of day
pub mod timefmt;
