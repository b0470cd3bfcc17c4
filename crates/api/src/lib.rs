//! # Bookable API
//!
//! The API crate provides the web server for the Bookable appointment
//! service. Hosts register services with weekly recurring open hours and
//! named appointment types; users book time-boxed appointments against them.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Thin request adapters over the booking and repository layers
//! - **Booking**: The orchestrator composing admissibility, conflict
//!   detection, and persistence
//! - **Middleware**: Authentication and error handling
//! - **Config**: Environment and application configuration
//!
//! The API uses Axum as the web framework and SQLx for database access.

/// Booking orchestration: the create-appointment flow
pub mod booking;
/// Configuration module for API settings
pub mod config;
/// Request handlers that implement the endpoint logic
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use bookable_core::hours::DayBounds;
use bookable_core::timefmt::TimeFormats;
use eyre::{Result, WrapErr};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::config::ApiConfig;

/// Shared application state that is accessible to all request handlers
///
/// Besides the connection pool this carries the explicit configuration
/// values the booking engine needs: the canonical time formats and the
/// fully-open-day sentinels, both resolved once at startup.
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
    /// Application configuration loaded from the environment
    pub config: ApiConfig,
    /// Canonical textual formats for date-times and times of day
    pub formats: TimeFormats,
    /// First/last instants of a day, the fully-open sentinel pair
    pub day_bounds: DayBounds,
}

impl ApiState {
    /// Resolves the time formats and day-bounds sentinels from configuration
    ///
    /// Fails when the configured sentinel times do not parse with the
    /// configured time format.
    pub fn new(config: ApiConfig, db_pool: PgPool) -> Result<Self> {
        let formats = TimeFormats::new(&config.datetime_format, &config.time_format);
        let min_time = formats
            .parse_time(&config.service_min_time)
            .wrap_err("Invalid SERVICE_MIN_TIME")?;
        let max_time = formats
            .parse_time(&config.service_max_time)
            .wrap_err("Invalid SERVICE_MAX_TIME")?;

        Ok(Self {
            db_pool,
            config,
            formats,
            day_bounds: DayBounds::new(min_time, max_time),
        })
    }
}

/// Starts the API server with the provided configuration and database connection
///
/// This function initializes logging, resolves the shared state, configures
/// routes, and starts the HTTP server.
pub async fn start_server(config: ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create shared state with dependencies
    let state = Arc::new(ApiState::new(config.clone(), db_pool)?);

    // Build the application router with all routes
    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // User registration and lookup
        .merge(routes::user::routes())
        // Credential verification and token issuance
        .merge(routes::login::routes())
        // Service and appointment-type management
        .merge(routes::service::routes())
        // Appointment booking
        .merge(routes::appointment::routes())
        // Attach shared state to all routes
        .with_state(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(
                origins
                    .iter()
                    .map(|origin| origin.parse().unwrap())
                    .collect::<Vec<_>>(),
            )
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(tower_http::timeout::TimeoutLayer::new(
        std::time::Duration::from_secs(config.request_timeout),
    ));

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
