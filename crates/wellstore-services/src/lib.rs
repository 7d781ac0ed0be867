//! Wellstore Services Layer
//!
//! Business logic for the admin console. The centre of it is the bulk product
//! import: archive extraction, manifest parsing, image resolution and the
//! per-row coordinator that turns an uploaded ZIP into an `IngestionResult`.
//! HTTP concerns stay in wellstore-api.

pub mod archive;
pub mod error;
pub mod ingest;

pub use archive::{build_import_template, extract_archive, ArchiveEntry, ArchiveLimits, EntryKind};
pub use error::IngestError;
pub use ingest::{ProductImportService, TEMPLATE_FILENAME};
pub use wellstore_storage::{
    create_storage, LocalStorage, S3Storage, Storage, StorageBackend, StorageError, StorageResult,
};
