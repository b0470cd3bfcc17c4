use axum::{
    extract::{Path, State},
    Json,
};
use bookable_core::{
    errors::BookingError,
    models::{
        appointment_type::{ApptTypeResponse, CreateApptTypeRequest},
        service::{CreateServiceRequest, DayHoursInput, ServiceDayHours, ServiceResponse},
    },
};
use bookable_db::models::{DbService, NewService};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

/// Fills unspecified open/close times with the configured service defaults
fn resolve_day(state: &ApiState, input: &DayHoursInput) -> (bool, String, String) {
    let open_time = input
        .open_time
        .clone()
        .unwrap_or_else(|| state.config.service_default_open_time.clone());
    let close_time = input
        .close_time
        .clone()
        .unwrap_or_else(|| state.config.service_default_close_time.clone());
    (input.is_open, open_time, close_time)
}

fn service_response(service: DbService) -> ServiceResponse {
    let [monday, tuesday, wednesday, thursday, friday, saturday, sunday] = service
        .day_columns()
        .map(|(is_open, open_time, close_time)| ServiceDayHours {
            is_open,
            open_time: open_time.to_string(),
            close_time: close_time.to_string(),
        });

    ServiceResponse {
        id: service.id,
        host_id: service.host_id,
        service_name: service.service_name,
        street_address: service.street_address,
        city: service.city,
        state: service.state,
        zip_code: service.zip_code,
        phone_number: service.phone_number,
        monday,
        tuesday,
        wednesday,
        thursday,
        friday,
        saturday,
        sunday,
        created_at: service.created_at,
        updated_at: service.updated_at,
    }
}

fn appt_type_response(appt_type: bookable_db::models::DbApptType) -> ApptTypeResponse {
    ApptTypeResponse {
        id: appt_type.id,
        service_id: appt_type.service_id,
        appt_type_name: appt_type.appt_type_name,
        appt_duration_minutes: appt_type.appt_duration_minutes,
        created_at: appt_type.created_at,
        updated_at: appt_type.updated_at,
    }
}

#[axum::debug_handler]
pub async fn create_service(
    State(state): State<Arc<ApiState>>,
    auth_user: AuthUser,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<Json<ServiceResponse>, AppError> {
    let days = payload
        .days()
        .map(|input| resolve_day(&state, input));

    // Every stored time must parse with the canonical format; rejecting here
    // keeps corrupt hours out of the schedule entirely
    for (_, open_time, close_time) in &days {
        state.formats.parse_time(open_time)?;
        state.formats.parse_time(close_time)?;
    }

    let new_service = NewService {
        service_name: payload.service_name,
        street_address: payload.street_address,
        city: payload.city,
        state: payload.state,
        zip_code: payload.zip_code,
        phone_number: payload.phone_number,
        days,
    };

    let db_service = bookable_db::repositories::service::create_service(
        &state.db_pool,
        auth_user.user_id,
        &new_service,
    )
    .await
    .map_err(BookingError::Database)?;

    Ok(Json(service_response(db_service)))
}

#[axum::debug_handler]
pub async fn get_services(
    State(state): State<Arc<ApiState>>,
    auth_user: AuthUser,
) -> Result<Json<Vec<ServiceResponse>>, AppError> {
    let db_services = bookable_db::repositories::service::get_services_by_host_id(
        &state.db_pool,
        auth_user.user_id,
    )
    .await
    .map_err(BookingError::Database)?;

    Ok(Json(db_services.into_iter().map(service_response).collect()))
}

#[axum::debug_handler]
pub async fn get_service(
    State(state): State<Arc<ApiState>>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceResponse>, AppError> {
    let db_service = bookable_db::repositories::service::get_service_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Service with ID {id} not found")))?;

    Ok(Json(service_response(db_service)))
}

/// Creates an appointment type on a service owned by the caller
///
/// Duration positivity is enforced here; the admissibility check never sees
/// a non-positive duration.
#[axum::debug_handler]
pub async fn create_appt_type(
    State(state): State<Arc<ApiState>>,
    auth_user: AuthUser,
    Path(service_id): Path<Uuid>,
    Json(payload): Json<CreateApptTypeRequest>,
) -> Result<Json<ApptTypeResponse>, AppError> {
    if payload.appt_duration_minutes <= 0 {
        return Err(AppError(BookingError::Validation(
            "Appointment duration must be a positive number of minutes".to_string(),
        )));
    }

    let db_service =
        bookable_db::repositories::service::get_service_by_id(&state.db_pool, service_id)
            .await
            .map_err(BookingError::Database)?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Service with ID {service_id} not found"))
            })?;

    if db_service.host_id != auth_user.user_id {
        return Err(AppError(BookingError::Authorization(
            "Only the host may add appointment types to a service".to_string(),
        )));
    }

    let db_appt_type = match bookable_db::repositories::appt_type::create_appt_type(
        &state.db_pool,
        service_id,
        &payload.appt_type_name,
        payload.appt_duration_minutes,
    )
    .await
    {
        Ok(appt_type) => appt_type,
        Err(err) if bookable_db::violated_constraint(&err) == Some("appt_types_name_unique") => {
            return Err(AppError(BookingError::Validation(format!(
                "Appointment type {:?} already exists for this service",
                payload.appt_type_name
            ))));
        }
        Err(err) => return Err(AppError(BookingError::Database(err))),
    };

    Ok(Json(appt_type_response(db_appt_type)))
}
