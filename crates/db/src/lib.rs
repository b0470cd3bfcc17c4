pub mod models;
pub mod repositories;
pub mod schema;

pub mod mock;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Name of the constraint a query violated, if the error is a database
/// constraint violation
///
/// The booking orchestrator uses this to treat an `appts_no_overlap`
/// exclusion violation at insert time as an ordinary scheduling conflict,
/// and the user repository to report duplicate emails.
pub fn violated_constraint(err: &eyre::Report) -> Option<&str> {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .and_then(|db_err| db_err.constraint())
}
