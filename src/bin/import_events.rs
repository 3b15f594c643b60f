use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use event_planner::{config::DatabaseConfig, database::Database, importer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let rust_log = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "import_events=info,event_planner=info".to_string());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "events.json".to_string());
    let raw = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read {}", path))?;

    let events = importer::parse_document(&raw).context("Failed to parse export")?;
    info!("Found {} valid events to import", events.len());

    let config = DatabaseConfig::from_env().context("Invalid configuration")?;
    let db = Database::new(&config.url, config.pool_size)
        .await
        .context("Failed to connect to database")?;
    info!("Importer connected to database {}", db.current_database().await?);

    let summary = importer::import_events(&db, &events).await;
    db.close().await;

    info!(
        "Import complete: inserted {}, skipped {} (already in database), failed {}, total valid {}",
        summary.inserted,
        summary.duplicates,
        summary.failed,
        events.len()
    );
    Ok(())
}
