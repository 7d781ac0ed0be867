//! Wire repositories and services into `AppState`

use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use wellstore_core::Config;
use wellstore_db::{CategoryRepository, MessageRepository, ProductRepository, VendorRepository};
use wellstore_services::{ArchiveLimits, ProductImportService, Storage};

use crate::constants::IMPORT_CANCEL_GRACE_SECS;
use crate::state::{AppState, CatalogState, HealthState, ImportState, MessageState};

pub fn initialize_services(
    config: &Config,
    pool: PgPool,
    storage: Arc<dyn Storage>,
) -> Arc<AppState> {
    let categories = CategoryRepository::new(pool.clone());
    let vendors = VendorRepository::new(pool.clone());
    let products = ProductRepository::new(pool.clone());

    let import_service = ProductImportService::new(
        Arc::new(categories.clone()),
        Arc::new(vendors.clone()),
        Arc::new(products.clone()),
        storage.clone(),
        ArchiveLimits::from(&config.import),
    );

    tracing::info!(
        max_archive_mb = config.max_archive_size_bytes() / 1024 / 1024,
        import_timeout_secs = config.import_timeout_secs(),
        "Product import service ready"
    );

    Arc::new(AppState {
        catalog: CatalogState {
            categories,
            vendors,
            products,
        },
        messages: MessageState {
            repository: MessageRepository::new(pool.clone()),
        },
        import: ImportState {
            service: Arc::new(import_service),
            timeout: Duration::from_secs(config.import_timeout_secs()),
            cancel_grace: Duration::from_secs(IMPORT_CANCEL_GRACE_SECS),
            max_archive_bytes: config.max_archive_size_bytes(),
        },
        health: HealthState { pool, storage },
    })
}
