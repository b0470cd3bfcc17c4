use axum::{extract::State, Json};
use bookable_core::models::appointment::{ApptResponse, CreateApptRequest};
use std::sync::Arc;

use crate::{
    booking,
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

/// Books an appointment for the authenticated user
///
/// All of the admissibility and conflict logic lives in the booking module;
/// this handler only adapts it to HTTP.
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    auth_user: AuthUser,
    Json(payload): Json<CreateApptRequest>,
) -> Result<Json<ApptResponse>, AppError> {
    let appt = booking::create_appointment(&state, auth_user.user_id, &payload).await?;

    Ok(Json(booking::appt_response(&state, appt)))
}
