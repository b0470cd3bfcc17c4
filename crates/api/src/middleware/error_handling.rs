//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the Bookable
//! API. It maps domain-specific errors to appropriate HTTP status codes and
//! JSON error responses, ensuring a consistent error handling experience
//! across the entire API.
//!
//! Callers receive exactly one rejection reason. A scheduling conflict is
//! reported identically whether it was detected by the pre-insert query or
//! raised by the overlap constraint at insert time, and an admissibility
//! rejection never reveals which phase of the check failed.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bookable_core::errors::BookingError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific [`BookingError`] instances and
/// implements `IntoResponse` to convert them into HTTP responses with
/// appropriate status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub BookingError);

/// Converts application errors to HTTP responses
///
/// This implementation maps each error type to the appropriate HTTP status
/// code and formats the error message into a JSON response body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::InvalidAppointmentTime => StatusCode::BAD_REQUEST,
            BookingError::SchedulingConflict => StatusCode::CONFLICT,
            BookingError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::Authentication(_) => StatusCode::UNAUTHORIZED,
            BookingError::Authorization(_) => StatusCode::FORBIDDEN,
            BookingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        // Combine status code and JSON body into a response
        (status, body).into_response()
    }
}

/// Automatic conversion from BookingError to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, BookingError>` in handler functions that return
/// `Result<T, AppError>`.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Maps a BookingError to an HTTP response
///
/// Convenience for code that has a bare error rather than a handler result.
pub fn map_error(err: BookingError) -> Response {
    AppError(err).into_response()
}

/// Automatic conversion from eyre::Report to AppError
///
/// Wraps the eyre error in a `BookingError::Database` variant, the policy
/// for storage-layer faults with no more specific classification.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Database(err))
    }
}
