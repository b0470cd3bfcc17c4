use crate::models::{DbService, NewService};
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const SERVICE_COLUMNS: &str = r#"
    id, host_id, service_name, street_address, city, state, zip_code, phone_number,
    is_open_mo, is_open_tu, is_open_we, is_open_th, is_open_fr, is_open_sa, is_open_su,
    open_time_mo, open_time_tu, open_time_we, open_time_th, open_time_fr, open_time_sa, open_time_su,
    close_time_mo, close_time_tu, close_time_we, close_time_th, close_time_fr, close_time_sa, close_time_su,
    created_at, updated_at
"#;

pub async fn create_service(
    pool: &Pool<Postgres>,
    host_id: Uuid,
    service: &NewService,
) -> Result<DbService> {
    let id = Uuid::new_v4();
    let now = Utc::now().naive_utc();

    tracing::debug!(
        "Creating service: id={}, host_id={}, name={}",
        id,
        host_id,
        service.service_name
    );

    let sql = format!(
        r#"
        INSERT INTO services (
            id, host_id, service_name, street_address, city, state, zip_code, phone_number,
            is_open_mo, is_open_tu, is_open_we, is_open_th, is_open_fr, is_open_sa, is_open_su,
            open_time_mo, open_time_tu, open_time_we, open_time_th, open_time_fr, open_time_sa, open_time_su,
            close_time_mo, close_time_tu, close_time_we, close_time_th, close_time_fr, close_time_sa, close_time_su,
            created_at, updated_at
        )
        VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8,
            $9, $10, $11, $12, $13, $14, $15,
            $16, $17, $18, $19, $20, $21, $22,
            $23, $24, $25, $26, $27, $28, $29,
            $30, $30
        )
        RETURNING {SERVICE_COLUMNS}
        "#
    );

    let mut query = sqlx::query_as::<_, DbService>(&sql)
        .bind(id)
        .bind(host_id)
        .bind(&service.service_name)
        .bind(&service.street_address)
        .bind(&service.city)
        .bind(&service.state)
        .bind(&service.zip_code)
        .bind(&service.phone_number);
    for (is_open, _, _) in &service.days {
        query = query.bind(is_open);
    }
    for (_, open_time, _) in &service.days {
        query = query.bind(open_time);
    }
    for (_, _, close_time) in &service.days {
        query = query.bind(close_time);
    }
    let created = query.bind(now).fetch_one(pool).await?;

    Ok(created)
}

pub async fn get_service_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbService>> {
    tracing::debug!("Getting service by id: {}", id);

    let sql = format!(
        r#"
        SELECT {SERVICE_COLUMNS}
        FROM services
        WHERE id = $1
        "#
    );

    let service = sqlx::query_as::<_, DbService>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    if service.is_none() {
        tracing::debug!("Service not found: id={}", id);
    }

    Ok(service)
}

pub async fn get_services_by_host_id(
    pool: &Pool<Postgres>,
    host_id: Uuid,
) -> Result<Vec<DbService>> {
    tracing::debug!("Getting services for host: {}", host_id);

    let sql = format!(
        r#"
        SELECT {SERVICE_COLUMNS}
        FROM services
        WHERE host_id = $1
        ORDER BY created_at ASC
        "#
    );

    let services = sqlx::query_as::<_, DbService>(&sql)
        .bind(host_id)
        .fetch_all(pool)
        .await?;

    Ok(services)
}
