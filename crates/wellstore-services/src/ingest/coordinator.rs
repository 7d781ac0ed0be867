use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use wellstore_core::models::{IngestionResult, NewProduct, ProductRow};
use wellstore_core::{AppError, CategoryLookup, ErrorMetadata, ProductGateway, VendorLookup};
use wellstore_storage::Storage;

use crate::archive::{extract_archive, ArchiveLimits, EntryKind};
use crate::error::IngestError;
use crate::ingest::{parse_manifest, AssetIndex};

/// Runs one bulk import: archive in, per-row report out.
///
/// Rows are independent. A row that fails validation, references an unknown
/// category or vendor, names a missing image, or is rejected by the catalog is
/// reported and skipped while the remaining rows continue. Only a broken
/// archive or manifest header aborts the batch, and that happens before any
/// row is written.
#[derive(Clone)]
pub struct ProductImportService {
    categories: Arc<dyn CategoryLookup>,
    vendors: Arc<dyn VendorLookup>,
    products: Arc<dyn ProductGateway>,
    storage: Arc<dyn Storage>,
    limits: ArchiveLimits,
}

impl ProductImportService {
    pub fn new(
        categories: Arc<dyn CategoryLookup>,
        vendors: Arc<dyn VendorLookup>,
        products: Arc<dyn ProductGateway>,
        storage: Arc<dyn Storage>,
        limits: ArchiveLimits,
    ) -> Self {
        Self {
            categories,
            vendors,
            products,
            storage,
            limits,
        }
    }

    pub fn limits(&self) -> ArchiveLimits {
        self.limits
    }

    /// Import every row of the manifest inside `archive`.
    ///
    /// `cancel` is checked between rows. Rows already created stay created and
    /// the returned report has `cancelled` set.
    #[tracing::instrument(skip(self, archive, cancel), fields(import.archive_bytes = archive.len()))]
    pub async fn import(
        &self,
        archive: Bytes,
        cancel: &CancellationToken,
    ) -> Result<IngestionResult, IngestError> {
        let limits = self.limits;
        let entries = tokio::task::spawn_blocking(move || extract_archive(&archive, &limits))
            .await
            .map_err(|e| IngestError::Task(format!("archive extraction failed: {}", e)))??;

        let manifest = entries
            .iter()
            .find(|entry| entry.kind == EntryKind::Tabular)
            .ok_or(IngestError::MissingManifest)?;
        tracing::debug!(manifest = %manifest.name, entries = entries.len(), "Using archive manifest");

        let rows = parse_manifest(&manifest.data)?;
        let assets = AssetIndex::new(&entries);
        let mut references = ReferenceCache::default();
        let mut result = IngestionResult::default();

        for row in rows {
            if cancel.is_cancelled() {
                tracing::warn!(
                    processed_rows = result.processed_rows,
                    "Import cancelled before reaching the end of the manifest"
                );
                result.cancelled = true;
                break;
            }

            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    result.record_skipped(e.index, e.reason);
                    continue;
                }
            };

            match self.import_row(&row, &assets, &mut references).await {
                Ok(id) => {
                    tracing::debug!(row = row.index, product_id = %id, "Imported product row");
                    result.record_created();
                }
                Err(reason) => {
                    tracing::debug!(row = row.index, reason = %reason, "Skipped product row");
                    result.record_skipped(row.index, reason);
                }
            }
        }

        tracing::info!(
            processed_rows = result.processed_rows,
            created = result.created,
            skipped = result.skipped,
            cancelled = result.cancelled,
            "Product import finished"
        );

        Ok(result)
    }

    /// Validate, resolve and persist one row. `Err` carries the report reason.
    async fn import_row(
        &self,
        row: &ProductRow,
        assets: &AssetIndex<'_>,
        references: &mut ReferenceCache,
    ) -> Result<Uuid, String> {
        row.check()?;

        let category_id = references
            .category(self.categories.as_ref(), &row.category)
            .await?
            .ok_or_else(|| format!("unknown category '{}'", row.category))?;
        let vendor_id = references
            .vendor(self.vendors.as_ref(), &row.vendor)
            .await?
            .ok_or_else(|| format!("unknown vendor '{}'", row.vendor))?;

        let image = match row.image.as_deref() {
            Some(name) => Some(assets.resolve(name).map_err(|e| e.to_string())?),
            None => None,
        };

        let stored = match image {
            Some(entry) => {
                let (key, url) = self
                    .storage
                    .upload(entry.base_name(), entry.content_type(), entry.data.clone())
                    .await
                    .map_err(|e| {
                        tracing::warn!(row = row.index, image = %entry.name, error = %e, "Image upload failed");
                        format!("failed to store image '{}'", entry.base_name())
                    })?;
                Some((key, url))
            }
            None => None,
        };

        let product = NewProduct {
            title: row.title.clone(),
            category_id,
            vendor_id,
            price: row.price,
            description: row.description.clone(),
            keywords: row.keyword_list(),
            stock: row.stock,
            image_key: stored.as_ref().map(|(key, _)| key.clone()),
            image_url: stored.as_ref().map(|(_, url)| url.clone()),
        };

        match self.products.insert_product(&product).await {
            Ok(id) => Ok(id),
            Err(e) => {
                if let Some((key, _)) = &stored {
                    if let Err(delete_err) = self.storage.delete(key).await {
                        tracing::warn!(
                            storage_key = %key,
                            error = %delete_err,
                            "Failed to remove image of rejected product row"
                        );
                    }
                }
                Err(rejection_reason(&e))
            }
        }
    }
}

fn rejection_reason(err: &AppError) -> String {
    match err {
        AppError::Conflict(msg) => format!("rejected by catalog: {}", msg),
        other => {
            tracing::error!(error = %other, "Product insert failed");
            other.client_message()
        }
    }
}

/// Name lookups remembered for the length of one batch.
///
/// Keys are trimmed and lowercased; misses are cached too. Lookup errors are
/// not cached so a later row can retry.
#[derive(Default)]
struct ReferenceCache {
    categories: HashMap<String, Option<Uuid>>,
    vendors: HashMap<String, Option<Uuid>>,
}

impl ReferenceCache {
    async fn category(
        &mut self,
        lookup: &dyn CategoryLookup,
        name: &str,
    ) -> Result<Option<Uuid>, String> {
        let key = cache_key(name);
        if let Some(id) = self.categories.get(&key) {
            return Ok(*id);
        }
        let id = lookup
            .find_category_id(name.trim())
            .await
            .map_err(|e| lookup_failure("category", name, &e))?;
        self.categories.insert(key, id);
        Ok(id)
    }

    async fn vendor(
        &mut self,
        lookup: &dyn VendorLookup,
        name: &str,
    ) -> Result<Option<Uuid>, String> {
        let key = cache_key(name);
        if let Some(id) = self.vendors.get(&key) {
            return Ok(*id);
        }
        let id = lookup
            .find_vendor_id(name.trim())
            .await
            .map_err(|e| lookup_failure("vendor", name, &e))?;
        self.vendors.insert(key, id);
        Ok(id)
    }
}

fn cache_key(name: &str) -> String {
    name.trim().to_lowercase()
}

fn lookup_failure(kind: &str, name: &str, err: &AppError) -> String {
    tracing::error!(error = %err, kind, name, "Reference lookup failed");
    format!("could not look up {} '{}': {}", kind, name, err.client_message())
}
