//! One-shot import of the cars snapshot into the database, without starting
//! the server. Usage: `seed [path/to/cars.json]`.

use std::path::PathBuf;

use anyhow::Context;
use dealership_api::{
    config::Config, constants::API_NAME, db, repository::CarRepository, service::CatalogSync,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| config.cars_json_path.clone());

    let pool = db::connect(&config)
        .await
        .context("Failed to open database")?;

    let sync = CatalogSync::new(CarRepository::new(pool.clone()));
    let report = sync
        .sync_file(&path)
        .await
        .with_context(|| format!("Failed to seed cars from {}", path.display()))?;

    pool.close().await;

    tracing::info!(
        "{} Seeded {} cars into {} ({} failed)",
        API_NAME,
        report.synced,
        config.database_url,
        report.failed
    );
    Ok(())
}
