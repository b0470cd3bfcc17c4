pub mod appointment;
pub mod login;
pub mod service;
pub mod user;
