use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::Config;
use crate::constants::API_NAME;

/// Opens the database file named by `DATABASE_URL` and applies pending
/// migrations. The pool is the single store handle for the whole process.
pub async fn connect(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections.max(1))
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    tracing::info!("{} Database ready at {}", API_NAME, config.database_url);
    Ok(pool)
}

/// Single-connection in-memory database with the schema applied. The
/// connection is never recycled, otherwise the data would vanish with it.
pub async fn memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
