pub mod appointment;
pub mod health;
pub mod login;
pub mod service;
pub mod user;
