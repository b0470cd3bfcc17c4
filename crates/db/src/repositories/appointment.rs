use crate::models::DbAppt;
use chrono::{NaiveDateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Returns the first existing appointment overlapping the candidate
/// interval for the same service and appointment type, if any.
///
/// The overlap test is asymmetric on purpose: a candidate whose start
/// equals an existing end, or whose end equals an existing start, is
/// back-to-back and does not conflict. Appointments of a different type on
/// the same service are not considered.
pub async fn find_conflicting_appt(
    pool: &Pool<Postgres>,
    service_id: Uuid,
    appt_type_name: &str,
    starts_at: NaiveDateTime,
    ends_at: NaiveDateTime,
) -> Result<Option<DbAppt>> {
    tracing::debug!(
        "Checking conflicts: service_id={}, type={}, interval=[{}, {}]",
        service_id,
        appt_type_name,
        starts_at,
        ends_at
    );

    let conflict = sqlx::query_as::<_, DbAppt>(
        r#"
        SELECT id, user_id, service_id, appt_type_name, appt_starts_at, appt_ends_at,
               created_at, updated_at
        FROM appts
        WHERE service_id = $1
          AND appt_type_name = $2
          AND (
                ($3 >= appt_starts_at AND $3 < appt_ends_at)
             OR ($4 > appt_starts_at AND $4 <= appt_ends_at)
          )
        ORDER BY appt_starts_at ASC
        LIMIT 1
        "#,
    )
    .bind(service_id)
    .bind(appt_type_name)
    .bind(starts_at)
    .bind(ends_at)
    .fetch_optional(pool)
    .await?;

    Ok(conflict)
}

/// The booking flow's single write; everything before it is a pure read.
///
/// May fail on the `appts_no_overlap` exclusion constraint when a
/// concurrent booking won the race after the pre-insert conflict check;
/// callers classify that via [`crate::violated_constraint`].
pub async fn insert_appt(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    service_id: Uuid,
    appt_type_name: &str,
    starts_at: NaiveDateTime,
    ends_at: NaiveDateTime,
) -> Result<DbAppt> {
    let id = Uuid::new_v4();
    let now = Utc::now().naive_utc();

    tracing::debug!(
        "Inserting appt: id={}, user_id={}, service_id={}, type={}",
        id,
        user_id,
        service_id,
        appt_type_name
    );

    let appt = sqlx::query_as::<_, DbAppt>(
        r#"
        INSERT INTO appts (id, user_id, service_id, appt_type_name, appt_starts_at, appt_ends_at,
                           created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
        RETURNING id, user_id, service_id, appt_type_name, appt_starts_at, appt_ends_at,
                  created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(service_id)
    .bind(appt_type_name)
    .bind(starts_at)
    .bind(ends_at)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(appt)
}
