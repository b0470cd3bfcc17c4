use bookable_db::{create_pool, schema};
use color_eyre::eyre::Result;
use dotenv::dotenv;

/// Drops and recreates the application schema for a clean environment.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| color_eyre::eyre::eyre!("DATABASE_URL environment variable must be set"))?;

    let db_pool = create_pool(&database_url).await?;

    schema::drop_tables(&db_pool).await?;
    println!("Dropped application tables");

    schema::initialize_database(&db_pool).await?;
    println!("Initialized database schema");

    Ok(())
}
