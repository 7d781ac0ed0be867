//! Zip handling for bulk product import: reading uploads and writing the template.

mod extractor;
mod template;

pub use extractor::{extract_archive, ArchiveEntry, ArchiveLimits, EntryKind};
pub use template::build_import_template;
