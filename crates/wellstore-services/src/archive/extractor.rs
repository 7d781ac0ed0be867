use std::io::{Cursor, Read};
use std::path::Component;

use wellstore_core::ImportConfig;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::IngestError;

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// What an archive entry is used for during import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Tabular,
    Image,
    Other,
}

impl EntryKind {
    fn from_name(name: &str) -> Self {
        match extension(name).as_deref() {
            Some("csv") => EntryKind::Tabular,
            Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => EntryKind::Image,
            _ => EntryKind::Other,
        }
    }
}

/// A file extracted from an uploaded archive
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Relative path inside the archive, `/`-separated
    pub name: String,
    pub data: Vec<u8>,
    pub kind: EntryKind,
}

impl ArchiveEntry {
    /// Final path segment (`images/tea.jpg` -> `tea.jpg`)
    pub fn base_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    pub fn content_type(&self) -> &'static str {
        match extension(&self.name).as_deref() {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("csv") => "text/csv",
            _ => "application/octet-stream",
        }
    }
}

/// Size ceiling applied while extracting
#[derive(Debug, Clone, Copy)]
pub struct ArchiveLimits {
    pub max_total_bytes: u64,
}

impl From<&ImportConfig> for ArchiveLimits {
    fn from(config: &ImportConfig) -> Self {
        Self {
            max_total_bytes: config.max_archive_size_bytes as u64,
        }
    }
}

impl Default for ArchiveLimits {
    fn default() -> Self {
        Self::from(&ImportConfig::default())
    }
}

/// Open a zip held in memory and return its file entries in archive order.
///
/// Directories are omitted. Entries whose path is absolute or climbs with `..`
/// are dropped with a warning. Both the upload and the sum of the entries'
/// uncompressed sizes must stay within `limits`; the declared sizes are checked
/// before decompressing and the actual bytes read are checked as well.
pub fn extract_archive(
    bytes: &[u8],
    limits: &ArchiveLimits,
) -> Result<Vec<ArchiveEntry>, IngestError> {
    let limit = limits.max_total_bytes;
    if bytes.len() as u64 > limit {
        return Err(IngestError::ArchiveTooLarge {
            size: bytes.len() as u64,
            limit,
        });
    }

    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(format_error)?;

    let mut entries = Vec::new();
    let mut total: u64 = 0;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i).map_err(format_error)?;

        if file.is_dir() {
            continue;
        }

        let raw_name = file.name().to_string();
        let name = match safe_entry_name(&raw_name, file.enclosed_name().is_some()) {
            Some(name) => name,
            None => {
                tracing::warn!(entry = %raw_name, "Dropping archive entry with unsafe path");
                continue;
            }
        };

        let declared = total.saturating_add(file.size());
        if declared > limit {
            return Err(IngestError::ArchiveTooLarge {
                size: declared,
                limit,
            });
        }

        let remaining = limit - total;
        let mut data = Vec::with_capacity(file.size().min(remaining) as usize);
        file.by_ref()
            .take(remaining + 1)
            .read_to_end(&mut data)
            .map_err(|e| IngestError::ArchiveFormat(format!("failed to read '{}': {}", raw_name, e)))?;

        total += data.len() as u64;
        if total > limit {
            return Err(IngestError::ArchiveTooLarge { size: total, limit });
        }

        let kind = EntryKind::from_name(&name);
        tracing::debug!(entry = %name, kind = ?kind, size_bytes = data.len(), "Extracted archive entry");
        entries.push(ArchiveEntry { name, data, kind });
    }

    Ok(entries)
}

fn format_error(err: ZipError) -> IngestError {
    IngestError::ArchiveFormat(err.to_string())
}

/// Normalise an entry name, or `None` if it could escape the extraction root.
fn safe_entry_name(raw: &str, enclosed: bool) -> Option<String> {
    if !enclosed || raw.contains('\0') {
        return None;
    }

    let normalized = raw.replace('\\', "/");
    if normalized.starts_with('/') {
        return None;
    }

    let mut parts = Vec::new();
    for component in std::path::Path::new(&normalized).components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?.to_string()),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    // Windows drive letters survive `components()` on unix
    if parts.first().is_some_and(|p| p.contains(':')) || parts.is_empty() {
        return None;
    }

    Some(parts.join("/"))
}

fn extension(name: &str) -> Option<String> {
    let base = name.rsplit('/').next().unwrap_or(name);
    let (stem, ext) = base.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
