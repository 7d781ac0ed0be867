//! Storage setup and initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use wellstore_core::Config;
use wellstore_services::{create_storage, Storage};

/// Build the image storage backend selected by `STORAGE_BACKEND`.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;
    tracing::info!(backend = %storage.backend_type(), "Storage initialized");
    Ok(storage)
}
