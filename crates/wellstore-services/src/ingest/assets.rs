use std::collections::HashMap;

use thiserror::Error;

use crate::archive::{ArchiveEntry, EntryKind};

/// A row names an image the archive does not contain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("image '{filename}' not found in archive")]
pub struct AssetNotFound {
    pub filename: String,
}

/// Lookup of image entries by name.
///
/// A name matches an entry's full relative path first, then its base name, so
/// `tea.jpg` finds `images/tea.jpg`. Matching is exact and case-sensitive; when
/// two entries share a base name the first one in archive order wins.
pub struct AssetIndex<'a> {
    by_path: HashMap<&'a str, &'a ArchiveEntry>,
    by_base_name: HashMap<&'a str, &'a ArchiveEntry>,
}

impl<'a> AssetIndex<'a> {
    pub fn new(entries: &'a [ArchiveEntry]) -> Self {
        let mut by_path = HashMap::new();
        let mut by_base_name = HashMap::new();

        for entry in entries.iter().filter(|e| e.kind == EntryKind::Image) {
            by_path.entry(entry.name.as_str()).or_insert(entry);
            by_base_name.entry(entry.base_name()).or_insert(entry);
        }

        Self {
            by_path,
            by_base_name,
        }
    }

    pub fn resolve(&self, filename: &str) -> Result<&'a ArchiveEntry, AssetNotFound> {
        self.by_path
            .get(filename)
            .or_else(|| self.by_base_name.get(filename))
            .copied()
            .ok_or_else(|| AssetNotFound {
                filename: filename.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}
