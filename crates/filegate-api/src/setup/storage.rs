//! Storage setup and initialization

use anyhow::{Context, Result};
use filegate_core::Config;
use filegate_storage::{create_storage, Storage};
use std::sync::Arc;

/// Build the storage client once; it is shared read-only by every request.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage")?;

    tracing::info!(
        bucket = %storage.bucket(),
        region = %config.region(),
        endpoint = ?config.endpoint(),
        max_attempts = config.storage_max_attempts(),
        "Storage initialized successfully"
    );

    Ok(storage)
}
