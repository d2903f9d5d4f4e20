use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::{AppConfig, StoreBackend};
use crate::database::{DatabaseManager, PgDatastore};

pub async fn handle(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    if config.database.backend == StoreBackend::Memory {
        anyhow::bail!("nothing to migrate: DATABASE_BACKEND is 'memory'");
    }

    let pool = DatabaseManager::connect(&config.database).await?;
    let store = PgDatastore::new(pool);
    store.migrate().await?;
    store.close().await;

    output_success(
        &output_format,
        "Document table is ready",
        Some(json!({ "table": "documents" })),
    )
}
