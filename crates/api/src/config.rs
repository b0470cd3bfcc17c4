//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the Bookable
//! API server. It retrieves configuration values from environment variables
//! and provides defaults where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `AUTH_SECRET`: Secret key for access-token signing (required)
//! - `AUTH_TOKEN_LIFE_MINUTES`: Access-token lifetime (default: 30)
//! - `PASSWORD_MIN_LENGTH` / `PASSWORD_MAX_LENGTH`: password bounds (8 / 64)
//! - `DT_DATETIME_FORMAT` / `DT_TIME_FORMAT`: canonical textual formats
//! - `SERVICE_DEFAULT_OPEN_TIME` / `SERVICE_DEFAULT_CLOSE_TIME`: hours used
//!   for weekdays a host leaves unspecified (09:00:00 / 17:00:00)
//! - `SERVICE_MIN_TIME` / `SERVICE_MAX_TIME`: the fully-open-day sentinels
//!   (00:00:00 / 23:59:59)
//!
//! Values are read once at startup and passed explicitly into the components
//! that need them; there is no process-wide settings singleton.

use bookable_core::timefmt::{DEFAULT_DATETIME_FORMAT, DEFAULT_TIME_FORMAT};
use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;

/// Configuration for the Bookable API server
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Secret key for access-token signing
    pub auth_secret: String,

    /// Access-token lifetime in minutes
    pub token_life_minutes: i64,

    /// Minimum accepted password length
    pub password_min_length: usize,

    /// Maximum accepted password length
    pub password_max_length: usize,

    /// strftime format for date-times crossing the API boundary
    pub datetime_format: String,

    /// strftime format for times of day
    pub time_format: String,

    /// Open time used for weekdays a host leaves unspecified
    pub service_default_open_time: String,

    /// Close time used for weekdays a host leaves unspecified
    pub service_default_close_time: String,

    /// First instant of a day; with `service_max_time`, the fully-open
    /// sentinel pair
    pub service_min_time: String,

    /// Last instant of a day
    pub service_max_time: String,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL or AUTH_SECRET environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        // Logging settings
        let log_level = match env::var("LOG_LEVEL")
            .unwrap_or_else(|_| "info".to_string())
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS")
            .ok()
            .map(|origins| origins.split(',').map(|s| s.trim().to_string()).collect());

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Security settings
        let auth_secret = env::var("AUTH_SECRET")
            .wrap_err("AUTH_SECRET environment variable must be set")?;
        let token_life_minutes = env::var("AUTH_TOKEN_LIFE_MINUTES")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);
        let password_min_length = env::var("PASSWORD_MIN_LENGTH")
            .unwrap_or_else(|_| "8".to_string())
            .parse()
            .unwrap_or(8);
        let password_max_length = env::var("PASSWORD_MAX_LENGTH")
            .unwrap_or_else(|_| "64".to_string())
            .parse()
            .unwrap_or(64);

        // Canonical time handling
        let datetime_format =
            env::var("DT_DATETIME_FORMAT").unwrap_or_else(|_| DEFAULT_DATETIME_FORMAT.to_string());
        let time_format =
            env::var("DT_TIME_FORMAT").unwrap_or_else(|_| DEFAULT_TIME_FORMAT.to_string());
        let service_default_open_time =
            env::var("SERVICE_DEFAULT_OPEN_TIME").unwrap_or_else(|_| "09:00:00".to_string());
        let service_default_close_time =
            env::var("SERVICE_DEFAULT_CLOSE_TIME").unwrap_or_else(|_| "17:00:00".to_string());
        let service_min_time =
            env::var("SERVICE_MIN_TIME").unwrap_or_else(|_| "00:00:00".to_string());
        let service_max_time =
            env::var("SERVICE_MAX_TIME").unwrap_or_else(|_| "23:59:59".to_string());

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            auth_secret,
            token_life_minutes,
            password_min_length,
            password_max_length,
            datetime_format,
            time_format,
            service_default_open_time,
            service_default_close_time,
            service_min_time,
            service_max_time,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
