use anyhow::{Context, Result};
use std::io::Write;
use wellstore_core::models::MANIFEST_COLUMNS;
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::ingest::TEMPLATE_FILENAME;

const SAMPLE_ROW: [&str; 8] = [
    "Green Tea",
    "Beverages",
    "Acme",
    "12.50",
    "Loose-leaf sencha, 100g",
    "organic,tea",
    "10",
    "",
];

const IMAGES_README: &str = "Put product images in this folder and reference them from the \
image column of products.csv by file name, e.g. tea.jpg. Leave the column empty for \
products without an image.\n";

/// Build the starter archive offered for download before a bulk import.
///
/// `products.csv` carries exactly the header the manifest parser expects plus one
/// example row; `images/` holds a short README.
pub fn build_import_template() -> Result<Vec<u8>> {
    let mut manifest = csv::Writer::from_writer(Vec::new());
    manifest
        .write_record(MANIFEST_COLUMNS)
        .context("Failed to write template header")?;
    manifest
        .write_record(SAMPLE_ROW)
        .context("Failed to write template sample row")?;
    let manifest = manifest
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush template manifest: {}", e))?;

    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(std::io::Cursor::new(&mut buffer));
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        zip.start_file(TEMPLATE_FILENAME, options)
            .context("Failed to add manifest to ZIP")?;
        zip.write_all(&manifest)
            .context("Failed to write manifest to ZIP")?;

        zip.add_directory("images/", options)
            .context("Failed to add images directory to ZIP")?;
        zip.start_file("images/README.txt", options)
            .context("Failed to add images README to ZIP")?;
        zip.write_all(IMAGES_README.as_bytes())
            .context("Failed to write images README to ZIP")?;

        zip.finish().context("Failed to finalize ZIP archive")?;
    }

    Ok(buffer)
}
