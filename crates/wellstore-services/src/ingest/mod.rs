//! Bulk product import

mod assets;
mod coordinator;
mod manifest;

pub use assets::{AssetIndex, AssetNotFound};
pub use coordinator::ProductImportService;
pub use manifest::{parse_manifest, ManifestRows, RowError};

/// Manifest name written by the template download
pub const TEMPLATE_FILENAME: &str = "products.csv";
