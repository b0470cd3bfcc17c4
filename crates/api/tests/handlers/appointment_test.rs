use bookable_api::middleware::error_handling::AppError;
use bookable_core::{
    errors::BookingError,
    hours::{check_admissible, DayBounds},
    models::appointment::{CandidateInterval, CreateApptRequest},
    timefmt::TimeFormats,
};
use bookable_db::models::{DbAppt, DbApptType};
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::test_utils::{business_hours_service, parse_datetime, TestContext};

fn day_bounds() -> DayBounds {
    let formats = TimeFormats::default();
    DayBounds::new(
        formats.parse_time("00:00:00").unwrap(),
        formats.parse_time("23:59:59").unwrap(),
    )
}

fn thirty_minute_type(service_id: Uuid) -> DbApptType {
    let now = parse_datetime("2024-11-01 12:00:00");
    DbApptType {
        id: Uuid::new_v4(),
        service_id,
        appt_type_name: "30 Min".to_string(),
        appt_duration_minutes: 30,
        created_at: now,
        updated_at: now,
    }
}

fn stored_appt(
    user_id: Uuid,
    service_id: Uuid,
    appt_type_name: String,
    starts_at: NaiveDateTime,
    ends_at: NaiveDateTime,
) -> DbAppt {
    let now = parse_datetime("2024-11-01 12:00:00");
    DbAppt {
        id: Uuid::new_v4(),
        user_id,
        service_id,
        appt_type_name,
        appt_starts_at: starts_at,
        appt_ends_at: ends_at,
        created_at: now,
        updated_at: now,
    }
}

// Mirrors the booking orchestration against the mock repositories: parse,
// look up service and type, compute the interval, run the admissibility
// check, query conflicts, insert.
async fn test_create_appointment_wrapper(
    ctx: &mut TestContext,
    user_id: Uuid,
    request: &CreateApptRequest,
) -> Result<DbAppt, AppError> {
    let formats = TimeFormats::default();
    let bounds = day_bounds();

    let starts_at = formats.parse_datetime(&request.appt_starts_at)?;

    let service = ctx
        .service_repo
        .get_service_by_id(request.service_id)
        .await?
        .ok_or_else(|| AppError(BookingError::NotFound("Service not found".to_string())))?;

    let appt_type = ctx
        .appt_type_repo
        .get_appt_type_by_service_id_and_name(request.service_id, request.appt_type_name.clone())
        .await?
        .ok_or_else(|| {
            AppError(BookingError::NotFound(
                "Appointment type not found".to_string(),
            ))
        })?;

    let interval = CandidateInterval::from_start(starts_at, appt_type.appt_duration_minutes)?;

    let schedule = service.weekly_schedule(&formats)?;
    check_admissible(&schedule, &bounds, &interval)?;

    if ctx
        .appt_repo
        .find_conflicting_appt(
            request.service_id,
            request.appt_type_name.clone(),
            interval.starts_at,
            interval.ends_at,
        )
        .await?
        .is_some()
    {
        return Err(AppError(BookingError::SchedulingConflict));
    }

    match ctx
        .appt_repo
        .insert_appt(
            user_id,
            request.service_id,
            request.appt_type_name.clone(),
            interval.starts_at,
            interval.ends_at,
        )
        .await
    {
        Ok(appt) => Ok(appt),
        Err(err) if bookable_db::violated_constraint(&err) == Some("appts_no_overlap") => {
            Err(AppError(BookingError::SchedulingConflict))
        }
        Err(err) => Err(AppError(BookingError::Database(err))),
    }
}

fn booking_request(service_id: Uuid, starts_at: &str) -> CreateApptRequest {
    CreateApptRequest {
        service_id,
        appt_type_name: "30 Min".to_string(),
        appt_starts_at: starts_at.to_string(),
    }
}

/// Wires the happy-path service and appointment-type lookups into the mocks
fn expect_lookups(ctx: &mut TestContext, service_id: Uuid, host_id: Uuid) {
    ctx.service_repo
        .expect_get_service_by_id()
        .returning(move |id| Ok(Some(business_hours_service(id, host_id))));
    ctx.appt_type_repo
        .expect_get_appt_type_by_service_id_and_name()
        .returning(|service_id, _| Ok(Some(thirty_minute_type(service_id))));
}

/// Makes the conflict query behave as if exactly one appointment,
/// `[existing_start, existing_end)`, were stored, applying the asymmetric
/// overlap rule the repository implements in SQL
fn expect_one_existing_appt(ctx: &mut TestContext, existing_start: &str, existing_end: &str) {
    let existing_start = parse_datetime(existing_start);
    let existing_end = parse_datetime(existing_end);
    ctx.appt_repo
        .expect_find_conflicting_appt()
        .returning(move |service_id, name, starts_at, ends_at| {
            let overlaps = (starts_at >= existing_start && starts_at < existing_end)
                || (ends_at > existing_start && ends_at <= existing_end);
            Ok(overlaps
                .then(|| stored_appt(Uuid::new_v4(), service_id, name, existing_start, existing_end)))
        });
}

fn expect_insert_succeeds(ctx: &mut TestContext) {
    ctx.appt_repo.expect_insert_appt().returning(
        |user_id, service_id, name, starts_at, ends_at| {
            Ok(stored_appt(user_id, service_id, name, starts_at, ends_at))
        },
    );
}

#[tokio::test]
async fn test_booking_within_open_hours_succeeds() {
    let mut ctx = TestContext::new();
    let service_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    expect_lookups(&mut ctx, service_id, Uuid::new_v4());
    ctx.appt_repo
        .expect_find_conflicting_appt()
        .returning(|_, _, _, _| Ok(None));
    expect_insert_succeeds(&mut ctx);

    // 2024-11-25 is a Monday; the service opens at 09:00
    let request = booking_request(service_id, "2024-11-25 09:00:00");
    let appt = test_create_appointment_wrapper(&mut ctx, user_id, &request)
        .await
        .expect("booking should succeed");

    assert_eq!(appt.user_id, user_id);
    assert_eq!(appt.appt_starts_at, parse_datetime("2024-11-25 09:00:00"));
    // end computed as start plus the type's 30-minute duration
    assert_eq!(appt.appt_ends_at, parse_datetime("2024-11-25 09:30:00"));
}

#[tokio::test]
async fn test_booking_unknown_service_is_not_found() {
    let mut ctx = TestContext::new();
    ctx.service_repo
        .expect_get_service_by_id()
        .returning(|_| Ok(None));

    let request = booking_request(Uuid::new_v4(), "2024-11-25 09:00:00");
    let err = test_create_appointment_wrapper(&mut ctx, Uuid::new_v4(), &request)
        .await
        .expect_err("unknown service must be rejected");

    assert!(matches!(err.0, BookingError::NotFound(_)));
}

#[tokio::test]
async fn test_booking_unknown_appt_type_is_not_found() {
    let mut ctx = TestContext::new();
    let service_id = Uuid::new_v4();
    ctx.service_repo
        .expect_get_service_by_id()
        .returning(move |id| Ok(Some(business_hours_service(id, Uuid::new_v4()))));
    ctx.appt_type_repo
        .expect_get_appt_type_by_service_id_and_name()
        .returning(|_, _| Ok(None));

    let request = booking_request(service_id, "2024-11-25 09:00:00");
    let err = test_create_appointment_wrapper(&mut ctx, Uuid::new_v4(), &request)
        .await
        .expect_err("unknown appointment type must be rejected");

    assert!(matches!(err.0, BookingError::NotFound(_)));
}

#[tokio::test]
async fn test_booking_with_malformed_start_is_rejected_before_lookups() {
    // no expectations are registered: any repository call would panic
    let mut ctx = TestContext::new();

    let request = booking_request(Uuid::new_v4(), "2024-11-25T09:00:00");
    let err = test_create_appointment_wrapper(&mut ctx, Uuid::new_v4(), &request)
        .await
        .expect_err("malformed datetime must be rejected");

    assert!(matches!(err.0, BookingError::MalformedInput(_)));
}

#[tokio::test]
async fn test_booking_on_closed_weekday_is_invalid_time() {
    let mut ctx = TestContext::new();
    let service_id = Uuid::new_v4();
    expect_lookups(&mut ctx, service_id, Uuid::new_v4());

    // 2024-11-23 is a Saturday; the conflict query must never run
    let request = booking_request(service_id, "2024-11-23 09:00:00");
    let err = test_create_appointment_wrapper(&mut ctx, Uuid::new_v4(), &request)
        .await
        .expect_err("closed weekday must be rejected");

    assert!(matches!(err.0, BookingError::InvalidAppointmentTime));
}

#[tokio::test]
async fn test_booking_ending_past_close_is_invalid_time() {
    let mut ctx = TestContext::new();
    let service_id = Uuid::new_v4();
    expect_lookups(&mut ctx, service_id, Uuid::new_v4());

    // 16:45 + 30 minutes ends at 17:15, past the 17:00 close
    let request = booking_request(service_id, "2024-11-25 16:45:00");
    let err = test_create_appointment_wrapper(&mut ctx, Uuid::new_v4(), &request)
        .await
        .expect_err("interval past close must be rejected");

    assert!(matches!(err.0, BookingError::InvalidAppointmentTime));
}

#[tokio::test]
async fn test_overlapping_booking_is_a_conflict() {
    let mut ctx = TestContext::new();
    let service_id = Uuid::new_v4();
    expect_lookups(&mut ctx, service_id, Uuid::new_v4());
    expect_one_existing_appt(&mut ctx, "2024-11-25 09:00:00", "2024-11-25 09:30:00");

    // starts one minute before the existing appointment ends
    let request = booking_request(service_id, "2024-11-25 09:29:00");
    let err = test_create_appointment_wrapper(&mut ctx, Uuid::new_v4(), &request)
        .await
        .expect_err("overlap must be rejected");

    assert!(matches!(err.0, BookingError::SchedulingConflict));
}

#[tokio::test]
async fn test_rebooking_same_slot_is_a_conflict() {
    let mut ctx = TestContext::new();
    let service_id = Uuid::new_v4();
    expect_lookups(&mut ctx, service_id, Uuid::new_v4());
    expect_one_existing_appt(&mut ctx, "2024-11-25 09:00:00", "2024-11-25 09:30:00");

    let request = booking_request(service_id, "2024-11-25 09:00:00");
    let err = test_create_appointment_wrapper(&mut ctx, Uuid::new_v4(), &request)
        .await
        .expect_err("identical slot must be rejected");

    assert!(matches!(err.0, BookingError::SchedulingConflict));
}

#[tokio::test]
async fn test_back_to_back_booking_is_not_a_conflict() {
    let mut ctx = TestContext::new();
    let service_id = Uuid::new_v4();
    expect_lookups(&mut ctx, service_id, Uuid::new_v4());
    expect_one_existing_appt(&mut ctx, "2024-11-25 09:00:00", "2024-11-25 09:30:00");
    expect_insert_succeeds(&mut ctx);

    // starts exactly when the existing appointment ends
    let request = booking_request(service_id, "2024-11-25 09:30:00");
    let appt = test_create_appointment_wrapper(&mut ctx, Uuid::new_v4(), &request)
        .await
        .expect("adjacency is permitted");

    assert_eq!(appt.appt_starts_at, parse_datetime("2024-11-25 09:30:00"));
    assert_eq!(appt.appt_ends_at, parse_datetime("2024-11-25 10:00:00"));
}

#[tokio::test]
async fn test_rejection_is_identical_on_repeat() {
    let mut ctx = TestContext::new();
    let service_id = Uuid::new_v4();
    expect_lookups(&mut ctx, service_id, Uuid::new_v4());

    let request = booking_request(service_id, "2024-11-23 09:00:00");

    let first = test_create_appointment_wrapper(&mut ctx, Uuid::new_v4(), &request)
        .await
        .expect_err("closed weekday must be rejected");
    let second = test_create_appointment_wrapper(&mut ctx, Uuid::new_v4(), &request)
        .await
        .expect_err("closed weekday must be rejected");

    assert!(matches!(first.0, BookingError::InvalidAppointmentTime));
    assert!(matches!(second.0, BookingError::InvalidAppointmentTime));
}

/// Stand-in for the Postgres error raised by the `appts_no_overlap`
/// exclusion constraint
#[derive(Debug)]
struct OverlapConstraintError;

impl std::fmt::Display for OverlapConstraintError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "conflicting key value violates exclusion constraint \"appts_no_overlap\""
        )
    }
}

impl std::error::Error for OverlapConstraintError {}

impl sqlx::error::DatabaseError for OverlapConstraintError {
    fn message(&self) -> &str {
        "conflicting key value violates exclusion constraint \"appts_no_overlap\""
    }

    fn kind(&self) -> sqlx::error::ErrorKind {
        sqlx::error::ErrorKind::Other
    }

    fn constraint(&self) -> Option<&str> {
        Some("appts_no_overlap")
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }
}

#[tokio::test]
async fn test_insert_losing_overlap_race_is_a_conflict() {
    let mut ctx = TestContext::new();
    let service_id = Uuid::new_v4();
    expect_lookups(&mut ctx, service_id, Uuid::new_v4());
    // nothing conflicts at check time, but a concurrent booking commits
    // before the insert and the exclusion constraint rejects it
    ctx.appt_repo
        .expect_find_conflicting_appt()
        .returning(|_, _, _, _| Ok(None));
    ctx.appt_repo.expect_insert_appt().returning(|_, _, _, _, _| {
        Err(eyre::Report::new(sqlx::Error::Database(Box::new(
            OverlapConstraintError,
        ))))
    });

    let request = booking_request(service_id, "2024-11-25 09:00:00");
    let err = test_create_appointment_wrapper(&mut ctx, Uuid::new_v4(), &request)
        .await
        .expect_err("losing the race must surface as a conflict");

    // classified exactly like a pre-insert detection
    assert!(matches!(err.0, BookingError::SchedulingConflict));
}

#[test]
fn test_violated_constraint_names_the_exclusion_constraint() {
    let err = eyre::Report::new(sqlx::Error::Database(Box::new(OverlapConstraintError)));
    assert_eq!(
        bookable_db::violated_constraint(&err),
        Some("appts_no_overlap")
    );
}

#[tokio::test]
async fn test_insert_failure_surfaces_as_database_error() {
    let mut ctx = TestContext::new();
    let service_id = Uuid::new_v4();
    expect_lookups(&mut ctx, service_id, Uuid::new_v4());
    ctx.appt_repo
        .expect_find_conflicting_appt()
        .returning(|_, _, _, _| Ok(None));
    ctx.appt_repo
        .expect_insert_appt()
        .returning(|_, _, _, _, _| Err(eyre::eyre!("connection reset")));

    let request = booking_request(service_id, "2024-11-25 09:00:00");
    let err = test_create_appointment_wrapper(&mut ctx, Uuid::new_v4(), &request)
        .await
        .expect_err("storage fault must surface");

    // a plain storage fault is not classified as a conflict
    assert!(matches!(err.0, BookingError::Database(_)));
}

#[test]
fn test_violated_constraint_ignores_non_database_errors() {
    let err = eyre::eyre!("connection reset");
    assert_eq!(bookable_db::violated_constraint(&err), None);
}
