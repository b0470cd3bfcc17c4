use axum::{extract::State, Json};
use bookable_core::{
    errors::BookingError,
    models::user::{LoginRequest, TokenResponse},
};
use std::sync::Arc;

use crate::{
    middleware::{auth, error_handling::AppError},
    ApiState,
};

/// Verifies credentials and issues an access token
///
/// The same rejection is returned for an unknown email and a wrong
/// password; the response does not reveal which one failed.
#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let db_user = bookable_db::repositories::user::get_user_by_email(&state.db_pool, &payload.email)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| {
            BookingError::Authentication("Invalid email or password".to_string())
        })?;

    let is_valid = auth::verify_password(&payload.password, &db_user.password_hash)?;
    if !is_valid {
        return Err(AppError(BookingError::Authentication(
            "Invalid email or password".to_string(),
        )));
    }

    let access_token = auth::create_access_token(
        db_user.id,
        &state.config.auth_secret,
        state.config.token_life_minutes,
    )?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
