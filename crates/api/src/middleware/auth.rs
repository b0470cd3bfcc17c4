//! # Authentication Module
//!
//! Password hashing and access-token handling for the Bookable API.
//!
//! Passwords are hashed with Argon2 before storage. Logins are exchanged for
//! a short-lived JWT whose subject is the user id; protected endpoints
//! extract the caller through [`AuthUser`], which validates the bearer token
//! against the configured secret.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use axum::{extract::FromRequestParts, http::request::Parts};
use bookable_core::errors::{BookingError, BookingResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// Hashes a password using the Argon2 algorithm
///
/// Generates a random salt per password and returns the PHC string format
/// (algorithm, version, parameters, salt, and hash).
pub fn hash_password(password: &str) -> BookingResult<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    // Create default Argon2 instance
    let argon2 = Argon2::default();

    // Hash the password with salt
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| BookingError::Internal(format!("Error hashing password: {e}").into()))?
        .to_string();

    Ok(password_hash)
}

/// Verifies a password against a stored Argon2 hash
pub fn verify_password(password: &str, stored_hash: &str) -> BookingResult<bool> {
    let parsed_hash = PasswordHash::new(stored_hash)
        .map_err(|e| BookingError::Internal(format!("Invalid password hash: {e}").into()))?;

    let is_valid = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();

    Ok(is_valid)
}

/// Claims carried by an access token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id the token was issued to
    pub sub: String,
    /// Issued-at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

/// Issues an access token for the given user
pub fn create_access_token(
    user_id: Uuid,
    secret: &str,
    life_minutes: i64,
) -> BookingResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(life_minutes)).timestamp(),
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| BookingError::Internal(Box::new(e)))
}

/// Validates an access token and returns the user id it was issued to
pub fn validate_access_token(token: &str, secret: &str) -> BookingResult<Uuid> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| BookingError::Authentication("Invalid or expired token".to_string()))?;

    Uuid::parse_str(&data.claims.sub)
        .map_err(|_| BookingError::Authentication("Invalid token subject".to_string()))
}

/// Authenticated caller, extracted from the `Authorization: Bearer` header
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
}

#[axum::async_trait]
impl FromRequestParts<Arc<ApiState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError(BookingError::Authentication(
                    "Missing authorization header".to_string(),
                ))
            })?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError(BookingError::Authentication(
                "Expected a bearer token".to_string(),
            ))
        })?;

        let user_id = validate_access_token(token, &state.config.auth_secret)?;
        Ok(AuthUser { user_id })
    }
}
