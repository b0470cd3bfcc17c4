use axum::{extract::State, Json};
use bookable_core::{
    errors::BookingError,
    models::user::{CreateUserRequest, UserResponse},
};
use bookable_db::models::DbUser;
use std::sync::Arc;

use crate::{
    middleware::{auth, auth::AuthUser, error_handling::AppError},
    ApiState,
};

fn user_response(user: DbUser) -> UserResponse {
    UserResponse {
        id: user.id,
        email: user.email,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

#[axum::debug_handler]
pub async fn create_user(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let password_length = payload.password.chars().count();
    if password_length < state.config.password_min_length
        || password_length > state.config.password_max_length
    {
        return Err(AppError(BookingError::Validation(format!(
            "Password must be between {} and {} characters",
            state.config.password_min_length, state.config.password_max_length
        ))));
    }

    let password_hash = auth::hash_password(&payload.password)?;

    let db_user = match bookable_db::repositories::user::create_user(
        &state.db_pool,
        &payload.email,
        &password_hash,
    )
    .await
    {
        Ok(user) => user,
        Err(err) if bookable_db::violated_constraint(&err) == Some("users_email_unique") => {
            return Err(AppError(BookingError::Validation(
                "Email is already registered".to_string(),
            )));
        }
        Err(err) => return Err(AppError(BookingError::Database(err))),
    };

    Ok(Json(user_response(db_user)))
}

#[axum::debug_handler]
pub async fn get_current_user(
    State(state): State<Arc<ApiState>>,
    auth_user: AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let db_user = bookable_db::repositories::user::get_user_by_id(&state.db_pool, auth_user.user_id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| {
            BookingError::NotFound(format!("User with ID {} not found", auth_user.user_id))
        })?;

    Ok(Json(user_response(db_user)))
}
