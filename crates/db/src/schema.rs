use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // needed for the gist exclusion constraint over uuid/text columns
    sqlx::query("CREATE EXTENSION IF NOT EXISTS btree_gist;")
        .execute(pool)
        .await?;

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            email VARCHAR(255) NOT NULL,
            password_hash VARCHAR(255) NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP NOT NULL DEFAULT NOW(),
            CONSTRAINT users_email_unique UNIQUE (email)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create services table. Open/close times are HH:MM:SS text, one column
    // triple per ISO weekday; TIMESTAMP columns deliberately carry no
    // timezone (all instants are normalized local time).
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            host_id UUID NOT NULL REFERENCES users(id),
            service_name VARCHAR(255) NOT NULL,
            street_address VARCHAR(255) NOT NULL,
            city VARCHAR(255) NOT NULL,
            state VARCHAR(255) NOT NULL,
            zip_code VARCHAR(32) NOT NULL,
            phone_number VARCHAR(32) NOT NULL,
            is_open_mo BOOLEAN NOT NULL DEFAULT FALSE,
            is_open_tu BOOLEAN NOT NULL DEFAULT FALSE,
            is_open_we BOOLEAN NOT NULL DEFAULT FALSE,
            is_open_th BOOLEAN NOT NULL DEFAULT FALSE,
            is_open_fr BOOLEAN NOT NULL DEFAULT FALSE,
            is_open_sa BOOLEAN NOT NULL DEFAULT FALSE,
            is_open_su BOOLEAN NOT NULL DEFAULT FALSE,
            open_time_mo VARCHAR(8) NOT NULL,
            open_time_tu VARCHAR(8) NOT NULL,
            open_time_we VARCHAR(8) NOT NULL,
            open_time_th VARCHAR(8) NOT NULL,
            open_time_fr VARCHAR(8) NOT NULL,
            open_time_sa VARCHAR(8) NOT NULL,
            open_time_su VARCHAR(8) NOT NULL,
            close_time_mo VARCHAR(8) NOT NULL,
            close_time_tu VARCHAR(8) NOT NULL,
            close_time_we VARCHAR(8) NOT NULL,
            close_time_th VARCHAR(8) NOT NULL,
            close_time_fr VARCHAR(8) NOT NULL,
            close_time_sa VARCHAR(8) NOT NULL,
            close_time_su VARCHAR(8) NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appt_types table; duration positivity is enforced here, not in
    // the admissibility check
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appt_types (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            service_id UUID NOT NULL REFERENCES services(id),
            appt_type_name VARCHAR(255) NOT NULL,
            appt_duration_minutes INTEGER NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP NOT NULL DEFAULT NOW(),
            CONSTRAINT appt_types_name_unique UNIQUE (service_id, appt_type_name),
            CONSTRAINT positive_duration CHECK (appt_duration_minutes > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appts table. The appts_no_overlap exclusion constraint is the
    // final double-booking guard: two requests can both pass the pre-insert
    // conflict query concurrently, and the loser's insert must fail. The
    // half-open tsrange keeps back-to-back appointments non-conflicting.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appts (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL REFERENCES users(id),
            service_id UUID NOT NULL REFERENCES services(id),
            appt_type_name VARCHAR(255) NOT NULL,
            appt_starts_at TIMESTAMP NOT NULL,
            appt_ends_at TIMESTAMP NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (appt_ends_at > appt_starts_at),
            CONSTRAINT appts_no_overlap EXCLUDE USING gist (
                service_id WITH =,
                appt_type_name WITH =,
                tsrange(appt_starts_at, appt_ends_at) WITH &&
            )
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes, one statement per query
    for index_sql in [
        "CREATE INDEX IF NOT EXISTS idx_services_host_id ON services(host_id);",
        "CREATE INDEX IF NOT EXISTS idx_appt_types_service_id ON appt_types(service_id);",
        "CREATE INDEX IF NOT EXISTS idx_appts_service_type ON appts(service_id, appt_type_name);",
        "CREATE INDEX IF NOT EXISTS idx_appts_starts_at ON appts(appt_starts_at);",
        "CREATE INDEX IF NOT EXISTS idx_appts_ends_at ON appts(appt_ends_at);",
    ] {
        sqlx::query(index_sql).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}

/// Drops all application tables; used by the db-migrate binary for a clean
/// re-initialization.
pub async fn drop_tables(pool: &Pool<Postgres>) -> Result<()> {
    info!("Dropping database tables...");

    sqlx::query("DROP TABLE IF EXISTS appts, appt_types, services, users CASCADE;")
        .execute(pool)
        .await?;

    Ok(())
}
