pub mod appointment;
pub mod appt_type;
pub mod service;
pub mod user;
