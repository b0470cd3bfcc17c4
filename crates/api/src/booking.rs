//! # Booking Orchestration
//!
//! The create-appointment flow: look up the service and appointment type,
//! compute the candidate interval, check admissibility against the weekly
//! schedule, check for conflicts, and persist.
//!
//! Steps short-circuit on the first failure. Everything before the insert is
//! a pure read, so no compensating action is ever needed on rejection. The
//! insert itself can still lose a race against a concurrent booking that
//! passed the same conflict check; the `appts_no_overlap` exclusion
//! constraint rejects the loser, and that rejection is surfaced as the same
//! [`BookingError::SchedulingConflict`] as a pre-insert detection. Neither
//! kind of conflict is retried here: the caller must pick a new time.

use bookable_core::errors::{BookingError, BookingResult};
use bookable_core::hours::check_admissible;
use bookable_core::models::appointment::{ApptResponse, CandidateInterval, CreateApptRequest};
use bookable_db::models::DbAppt;
use bookable_db::repositories::{appointment, appt_type, service};
use tracing::{debug, info};
use uuid::Uuid;

use crate::ApiState;

/// Books an appointment for `user_id`, returning the stored record
pub async fn create_appointment(
    state: &ApiState,
    user_id: Uuid,
    request: &CreateApptRequest,
) -> BookingResult<DbAppt> {
    // Malformed input is rejected before any interval computation
    let starts_at = state.formats.parse_datetime(&request.appt_starts_at)?;

    let service = service::get_service_by_id(&state.db_pool, request.service_id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound("Service not found".to_string()))?;

    let appt_type = appt_type::get_appt_type_by_service_id_and_name(
        &state.db_pool,
        request.service_id,
        &request.appt_type_name,
    )
    .await
    .map_err(BookingError::Database)?
    .ok_or_else(|| BookingError::NotFound("Appointment type not found".to_string()))?;

    // End instant is start plus the type's fixed duration
    let interval = CandidateInterval::from_start(starts_at, appt_type.appt_duration_minutes)?;

    // The schedule is read fresh per attempt; a service's hours can change
    // between requests
    let schedule = service.weekly_schedule(&state.formats)?;
    check_admissible(&schedule, &state.day_bounds, &interval)?;

    if let Some(existing) = appointment::find_conflicting_appt(
        &state.db_pool,
        request.service_id,
        &request.appt_type_name,
        interval.starts_at,
        interval.ends_at,
    )
    .await
    .map_err(BookingError::Database)?
    {
        debug!(
            "Booking rejected: conflicts with appt {} on service {}",
            existing.id, request.service_id
        );
        return Err(BookingError::SchedulingConflict);
    }

    // The single write of the flow
    match appointment::insert_appt(
        &state.db_pool,
        user_id,
        request.service_id,
        &request.appt_type_name,
        interval.starts_at,
        interval.ends_at,
    )
    .await
    {
        Ok(appt) => {
            info!(
                "Booked appt {} for user {} on service {} ({})",
                appt.id, user_id, appt.service_id, appt.appt_type_name
            );
            Ok(appt)
        }
        // A concurrent booking won the race between the conflict check and
        // the insert
        Err(err) if bookable_db::violated_constraint(&err) == Some("appts_no_overlap") => {
            debug!(
                "Booking rejected at insert: overlap constraint on service {}",
                request.service_id
            );
            Err(BookingError::SchedulingConflict)
        }
        Err(err) => Err(BookingError::Database(err)),
    }
}

/// Shapes a stored appointment row for the API response, with the interval
/// in the canonical text format
pub fn appt_response(state: &ApiState, appt: DbAppt) -> ApptResponse {
    ApptResponse {
        id: appt.id,
        user_id: appt.user_id,
        service_id: appt.service_id,
        appt_type_name: appt.appt_type_name,
        appt_starts_at: state.formats.format_datetime(appt.appt_starts_at),
        appt_ends_at: state.formats.format_datetime(appt.appt_ends_at),
        created_at: appt.created_at,
        updated_at: appt.updated_at,
    }
}
