//! Bulk import integration tests against in-memory collaborators.
//!
//! Run with: `cargo test -p wellstore-services --test ingest_test`

use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use wellstore_core::models::{IngestionResult, NewProduct};
use wellstore_core::{AppError, CategoryLookup, ProductGateway, VendorLookup};
use wellstore_services::{
    build_import_template, ArchiveLimits, IngestError, ProductImportService, Storage,
    StorageBackend, StorageResult,
};
use zip::write::{FileOptions, ZipWriter};

const HEADER: &str = "title,category,vendor,price,description,keywords,stock,image\n";

struct FakeCatalog {
    categories: HashMap<String, Uuid>,
    vendors: HashMap<String, Uuid>,
    lookups: Mutex<usize>,
}

impl FakeCatalog {
    fn new() -> Self {
        let categories = ["Beverages", "Gear"]
            .into_iter()
            .map(|name| (name.to_lowercase(), Uuid::new_v4()))
            .collect();
        let vendors = ["Acme"]
            .into_iter()
            .map(|name| (name.to_lowercase(), Uuid::new_v4()))
            .collect();
        Self {
            categories,
            vendors,
            lookups: Mutex::new(0),
        }
    }

    fn lookups(&self) -> usize {
        *self.lookups.lock().unwrap()
    }
}

#[async_trait]
impl CategoryLookup for FakeCatalog {
    async fn find_category_id(&self, name: &str) -> Result<Option<Uuid>, AppError> {
        *self.lookups.lock().unwrap() += 1;
        Ok(self.categories.get(&name.to_lowercase()).copied())
    }
}

#[async_trait]
impl VendorLookup for FakeCatalog {
    async fn find_vendor_id(&self, name: &str) -> Result<Option<Uuid>, AppError> {
        *self.lookups.lock().unwrap() += 1;
        Ok(self.vendors.get(&name.to_lowercase()).copied())
    }
}

#[derive(Default)]
struct FakeProducts {
    inserted: Mutex<Vec<NewProduct>>,
    reject_titles: Vec<String>,
}

impl FakeProducts {
    fn rejecting(titles: &[&str]) -> Self {
        Self {
            inserted: Mutex::new(Vec::new()),
            reject_titles: titles.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn inserted(&self) -> Vec<NewProduct> {
        self.inserted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductGateway for FakeProducts {
    async fn insert_product(&self, product: &NewProduct) -> Result<Uuid, AppError> {
        if self.reject_titles.contains(&product.title) {
            return Err(AppError::Conflict("product violates a catalog constraint".to_string()));
        }
        self.inserted.lock().unwrap().push(product.clone());
        Ok(Uuid::new_v4())
    }
}

#[derive(Default)]
struct MemoryStorage {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    deleted: Mutex<Vec<String>>,
}

impl MemoryStorage {
    fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn upload(
        &self,
        filename: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<(String, String)> {
        let key = format!("products/{}-{}", Uuid::new_v4(), filename);
        let url = format!("memory://{}", key);
        self.objects.lock().unwrap().insert(key.clone(), data);
        Ok((key, url))
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        self.objects.lock().unwrap().remove(storage_key);
        self.deleted.lock().unwrap().push(storage_key.to_string());
        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        Ok(self.objects.lock().unwrap().contains_key(storage_key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

struct Harness {
    catalog: Arc<FakeCatalog>,
    products: Arc<FakeProducts>,
    storage: Arc<MemoryStorage>,
    service: ProductImportService,
}

fn harness_with(products: FakeProducts, limits: ArchiveLimits) -> Harness {
    let catalog = Arc::new(FakeCatalog::new());
    let products = Arc::new(products);
    let storage = Arc::new(MemoryStorage::default());
    let service = ProductImportService::new(
        catalog.clone(),
        catalog.clone(),
        products.clone(),
        storage.clone(),
        limits,
    );
    Harness {
        catalog,
        products,
        storage,
        service,
    }
}

fn harness() -> Harness {
    harness_with(FakeProducts::default(), ArchiveLimits::default())
}

fn zip_of(files: &[(&str, &[u8])]) -> Bytes {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        for (name, data) in files {
            zip.start_file(*name, FileOptions::default()).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap();
    }
    Bytes::from(buffer)
}

fn manifest(rows: &[&str]) -> Vec<u8> {
    let mut csv = HEADER.to_string();
    for row in rows {
        csv.push_str(row);
        csv.push('\n');
    }
    csv.into_bytes()
}

async fn run(h: &Harness, archive: Bytes) -> Result<IngestionResult, IngestError> {
    h.service.import(archive, &CancellationToken::new()).await
}

#[tokio::test]
async fn test_one_good_row_one_bad_price() {
    let h = harness();
    let csv = manifest(&[
        "Green Tea,Beverages,Acme,12.50,,organic,10,tea.jpg",
        "Yoga Mat,Gear,Acme,abc,,,5,",
    ]);
    let archive = zip_of(&[("products.csv", &csv), ("images/tea.jpg", b"jpeg-bytes")]);

    let result = run(&h, archive).await.unwrap();

    assert_eq!(
        result,
        IngestionResult {
            processed_rows: 2,
            created: 1,
            skipped: 1,
            errors: vec!["Row 2: invalid price".to_string()],
            cancelled: false,
        }
    );

    let inserted = h.products.inserted();
    assert_eq!(inserted.len(), 1);
    assert_eq!(inserted[0].title, "Green Tea");
    assert_eq!(inserted[0].price, Decimal::from_str("12.50").unwrap());
    assert_eq!(inserted[0].keywords, vec!["organic".to_string()]);
    assert!(inserted[0].image_key.is_some());
    assert!(inserted[0].image_url.as_deref().unwrap().starts_with("memory://"));
    assert_eq!(h.storage.object_count(), 1);
}

#[tokio::test]
async fn test_all_valid_rows_are_created() {
    let h = harness();
    let rows: Vec<String> = (1..=5)
        .map(|i| format!("Herbal Blend {},Beverages,Acme,{}.00,,,{},", i, i, i))
        .collect();
    let row_refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    let archive = zip_of(&[("products.csv", &manifest(&row_refs))]);

    let result = run(&h, archive).await.unwrap();

    assert_eq!(result.processed_rows, 5);
    assert_eq!(result.created, 5);
    assert_eq!(result.skipped, 0);
    assert!(result.errors.is_empty());
    assert_eq!(h.products.inserted().len(), 5);
    assert_eq!(h.storage.object_count(), 0);
}

#[tokio::test]
async fn test_missing_image_skips_only_that_row() {
    let h = harness();
    let csv = manifest(&[
        "Green Tea,Beverages,Acme,1,,,1,nope.jpg",
        "Black Tea,Beverages,Acme,1,,,1,",
    ]);
    let archive = zip_of(&[("products.csv", &csv)]);

    let result = run(&h, archive).await.unwrap();

    assert_eq!(result.created, 1);
    assert_eq!(
        result.errors,
        vec!["Row 1: image 'nope.jpg' not found in archive".to_string()]
    );
}

#[tokio::test]
async fn test_unknown_references_and_validation_failures() {
    let h = harness();
    let csv = manifest(&[
        "Green Tea,Snacks,Acme,1,,,1,",
        "Green Tea,Beverages,Nobody,1,,,1,",
        "Ab,Beverages,Acme,1,,,1,",
        "Negative,Beverages,Acme,-1,,,1,",
        "Lowercase Ref,beverages,ACME,1,,,1,",
    ]);
    let archive = zip_of(&[("products.csv", &csv)]);

    let result = run(&h, archive).await.unwrap();

    assert_eq!(result.processed_rows, 5);
    assert_eq!(result.created, 1);
    assert_eq!(
        result.errors,
        vec![
            "Row 1: unknown category 'Snacks'".to_string(),
            "Row 2: unknown vendor 'Nobody'".to_string(),
            "Row 3: title must be between 3 and 200 characters".to_string(),
            "Row 4: price must not be negative".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_reference_lookups_are_cached_per_batch() {
    let h = harness();
    let csv = manifest(&[
        "Tea One,Beverages,Acme,1,,,1,",
        "Tea Two,beverages,acme,1,,,1,",
        "Tea Three,Snacks,Acme,1,,,1,",
        "Tea Four,Snacks,Acme,1,,,1,",
    ]);
    let archive = zip_of(&[("products.csv", &csv)]);

    let result = run(&h, archive).await.unwrap();

    assert_eq!(result.created, 2);
    assert_eq!(result.skipped, 2);
    // Beverages, Acme, Snacks
    assert_eq!(h.catalog.lookups(), 3);
}

#[tokio::test]
async fn test_rejected_insert_removes_stored_image() {
    let h = harness_with(FakeProducts::rejecting(&["Green Tea"]), ArchiveLimits::default());
    let csv = manifest(&["Green Tea,Beverages,Acme,1,,,1,tea.jpg"]);
    let archive = zip_of(&[("products.csv", &csv), ("tea.jpg", b"jpeg")]);

    let result = run(&h, archive).await.unwrap();

    assert_eq!(result.created, 0);
    assert_eq!(
        result.errors,
        vec!["Row 1: rejected by catalog: product violates a catalog constraint".to_string()]
    );
    assert_eq!(h.storage.deleted().len(), 1);
    assert_eq!(h.storage.object_count(), 0);
}

#[tokio::test]
async fn test_duplicate_titles_in_one_batch_are_each_inserted() {
    let h = harness();
    let csv = manifest(&[
        "Green Tea,Beverages,Acme,1,,,1,tea.jpg",
        "Green Tea,Beverages,Acme,2,,,1,tea.jpg",
    ]);
    let archive = zip_of(&[("products.csv", &csv), ("tea.jpg", b"jpeg")]);

    let result = run(&h, archive).await.unwrap();

    assert_eq!(result.created, 2);
    let inserted = h.products.inserted();
    assert_ne!(inserted[0].image_key, inserted[1].image_key);
    assert_eq!(h.storage.object_count(), 2);
}

#[tokio::test]
async fn test_reuploading_the_same_archive_creates_again() {
    let h = harness();
    let csv = manifest(&["Green Tea,Beverages,Acme,1,,,1,"]);
    let archive = zip_of(&[("products.csv", &csv)]);

    run(&h, archive.clone()).await.unwrap();
    let second = run(&h, archive).await.unwrap();

    assert_eq!(second.created, 1);
    assert_eq!(h.products.inserted().len(), 2);
}

#[tokio::test]
async fn test_traversal_entries_are_not_resolvable() {
    let h = harness();
    let csv = manifest(&["Green Tea,Beverages,Acme,1,,,1,evil.jpg"]);
    let archive = zip_of(&[("products.csv", &csv), ("../evil.jpg", b"x")]);

    let result = run(&h, archive).await.unwrap();

    assert_eq!(result.created, 0);
    assert_eq!(
        result.errors,
        vec!["Row 1: image 'evil.jpg' not found in archive".to_string()]
    );
}

#[tokio::test]
async fn test_header_only_manifest_reports_nothing() {
    let h = harness();
    let archive = zip_of(&[("products.csv", HEADER.as_bytes())]);

    let result = run(&h, archive).await.unwrap();

    assert_eq!(result, IngestionResult::default());
}

#[tokio::test]
async fn test_cancelled_token_stops_before_first_row() {
    let h = harness();
    let csv = manifest(&["Green Tea,Beverages,Acme,1,,,1,"]);
    let archive = zip_of(&[("products.csv", &csv)]);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = h.service.import(archive, &cancel).await.unwrap();

    assert!(result.cancelled);
    assert_eq!(result.processed_rows, 0);
    assert!(h.products.inserted().is_empty());
}

/// Cancels the shared token once its first product is stored.
struct CancellingProducts {
    cancel: CancellationToken,
    inner: FakeProducts,
}

#[async_trait]
impl ProductGateway for CancellingProducts {
    async fn insert_product(&self, product: &NewProduct) -> Result<Uuid, AppError> {
        let id = self.inner.insert_product(product).await?;
        self.cancel.cancel();
        Ok(id)
    }
}

#[tokio::test]
async fn test_cancel_mid_batch_keeps_committed_rows() {
    let cancel = CancellationToken::new();
    let catalog = Arc::new(FakeCatalog::new());
    let products = Arc::new(CancellingProducts {
        cancel: cancel.clone(),
        inner: FakeProducts::default(),
    });
    let service = ProductImportService::new(
        catalog.clone(),
        catalog,
        products.clone(),
        Arc::new(MemoryStorage::default()),
        ArchiveLimits::default(),
    );
    let csv = manifest(&[
        "Tea One,Beverages,Acme,1,,,1,",
        "Tea Two,Beverages,Acme,1,,,1,",
        "Tea Three,Beverages,Acme,1,,,1,",
    ]);
    let archive = zip_of(&[("products.csv", &csv)]);

    let result = service.import(archive, &cancel).await.unwrap();

    assert!(result.cancelled);
    assert_eq!(result.processed_rows, 1);
    assert_eq!(result.created, 1);
    assert_eq!(result.skipped, 0);
    let inserted = products.inner.inserted();
    assert_eq!(inserted.len(), 1);
    assert_eq!(inserted[0].title, "Tea One");
}

#[tokio::test]
async fn test_fatal_archive_errors() {
    let h = harness();

    let not_zip = run(&h, Bytes::from_static(b"plain text")).await;
    assert!(matches!(not_zip, Err(IngestError::ArchiveFormat(_))));

    let no_manifest = run(&h, zip_of(&[("tea.jpg", b"jpeg")])).await;
    assert!(matches!(no_manifest, Err(IngestError::MissingManifest)));

    let bad_header = run(&h, zip_of(&[("products.csv", b"name,price\nTea,1\n")])).await;
    assert!(matches!(bad_header, Err(IngestError::ManifestSchema(_))));

    let small = harness_with(
        FakeProducts::default(),
        ArchiveLimits {
            max_total_bytes: 64,
        },
    );
    let big = vec![b'a'; 4096];
    let too_large = run(&small, zip_of(&[("products.csv", &big)])).await;
    assert!(matches!(too_large, Err(IngestError::ArchiveTooLarge { .. })));

    assert!(h.products.inserted().is_empty());
}

#[tokio::test]
async fn test_template_imports_its_sample_row() {
    let h = harness();
    let template = build_import_template().unwrap();

    let result = run(&h, Bytes::from(template)).await.unwrap();

    assert_eq!(result.processed_rows, 1);
    assert_eq!(result.created, 1);
    assert_eq!(h.products.inserted()[0].title, "Green Tea");
}
