//! Shared key generation for storage backends.

use uuid::Uuid;

const PRODUCT_PREFIX: &str = "products";

/// Generate a fresh storage key for an uploaded product image.
///
/// The original filename only contributes its extension, lowercased and
/// restricted to ASCII alphanumerics, so keys never carry user-controlled paths.
pub fn generate_storage_key(filename: &str) -> String {
    let id = Uuid::new_v4();
    match extension_of(filename) {
        Some(ext) => format!("{}/{}.{}", PRODUCT_PREFIX, id, ext),
        None => format!("{}/{}", PRODUCT_PREFIX, id),
    }
}

fn extension_of(filename: &str) -> Option<String> {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let (stem, ext) = base.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
