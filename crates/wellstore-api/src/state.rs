//! Application state and sub-state extractors.
//!
//! Handlers extract only the sub-state they need via `FromRef`.

use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use wellstore_db::{CategoryRepository, MessageRepository, ProductRepository, VendorRepository};
use wellstore_services::{ProductImportService, Storage};

/// Catalog repositories backing the lookup endpoints
#[derive(Clone)]
pub struct CatalogState {
    pub categories: CategoryRepository,
    pub vendors: VendorRepository,
    pub products: ProductRepository,
}

/// Contact inbox
#[derive(Clone)]
pub struct MessageState {
    pub repository: MessageRepository,
}

/// Bulk import service and its request limits
#[derive(Clone)]
pub struct ImportState {
    pub service: Arc<ProductImportService>,
    pub timeout: Duration,
    /// Wait for the in-flight row after `timeout` before giving up on the task
    pub cancel_grace: Duration,
    pub max_archive_bytes: usize,
}

/// Dependencies probed by the readiness check
#[derive(Clone)]
pub struct HealthState {
    pub pool: PgPool,
    pub storage: Arc<dyn Storage>,
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogState,
    pub messages: MessageState,
    pub import: ImportState,
    pub health: HealthState,
}

impl FromRef<Arc<AppState>> for CatalogState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.catalog.clone()
    }
}

impl FromRef<Arc<AppState>> for MessageState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.messages.clone()
    }
}

impl FromRef<Arc<AppState>> for ImportState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.import.clone()
    }
}

impl FromRef<Arc<AppState>> for HealthState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.health.clone()
    }
}
