//! Collaborator traits consumed by the ingestion core
//!
//! The import pipeline only needs name lookups and a single-row insert. The
//! database crate implements these against Postgres; tests use in-memory fakes.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::NewProduct;

/// Resolve a category name to its id
#[async_trait]
pub trait CategoryLookup: Send + Sync {
    async fn find_category_id(&self, name: &str) -> Result<Option<Uuid>, AppError>;
}

/// Resolve a vendor name to its id
#[async_trait]
pub trait VendorLookup: Send + Sync {
    async fn find_vendor_id(&self, name: &str) -> Result<Option<Uuid>, AppError>;
}

/// Product table writer. Each call is atomic: the row is either inserted or not.
#[async_trait]
pub trait ProductGateway: Send + Sync {
    async fn insert_product(&self, product: &NewProduct) -> Result<Uuid, AppError>;
}
