use crate::models::DbApptType;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_appt_type(
    pool: &Pool<Postgres>,
    service_id: Uuid,
    appt_type_name: &str,
    appt_duration_minutes: i32,
) -> Result<DbApptType> {
    let id = Uuid::new_v4();
    let now = Utc::now().naive_utc();

    tracing::debug!(
        "Creating appt type: id={}, service_id={}, name={}, duration={}m",
        id,
        service_id,
        appt_type_name,
        appt_duration_minutes
    );

    let appt_type = sqlx::query_as::<_, DbApptType>(
        r#"
        INSERT INTO appt_types (id, service_id, appt_type_name, appt_duration_minutes, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $5)
        RETURNING id, service_id, appt_type_name, appt_duration_minutes, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(service_id)
    .bind(appt_type_name)
    .bind(appt_duration_minutes)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(appt_type)
}

pub async fn get_appt_type_by_service_id_and_name(
    pool: &Pool<Postgres>,
    service_id: Uuid,
    appt_type_name: &str,
) -> Result<Option<DbApptType>> {
    tracing::debug!(
        "Getting appt type: service_id={}, name={}",
        service_id,
        appt_type_name
    );

    let appt_type = sqlx::query_as::<_, DbApptType>(
        r#"
        SELECT id, service_id, appt_type_name, appt_duration_minutes, created_at, updated_at
        FROM appt_types
        WHERE service_id = $1 AND appt_type_name = $2
        "#,
    )
    .bind(service_id)
    .bind(appt_type_name)
    .fetch_optional(pool)
    .await?;

    Ok(appt_type)
}
