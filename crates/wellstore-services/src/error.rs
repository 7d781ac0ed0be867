use thiserror::Error;
use wellstore_core::AppError;

/// Failures that abort a whole import before any row is attempted.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("upload is not a readable zip archive: {0}")]
    ArchiveFormat(String),

    #[error("archive is too large: {size} bytes exceeds the {limit} byte limit")]
    ArchiveTooLarge { size: u64, limit: u64 },

    #[error("archive does not contain a .csv manifest")]
    MissingManifest,

    #[error("manifest header is invalid: {0}")]
    ManifestSchema(String),

    #[error("import task failed: {0}")]
    Task(String),
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::ArchiveFormat(_) => AppError::InvalidArchive(err.to_string()),
            IngestError::ArchiveTooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            IngestError::MissingManifest | IngestError::ManifestSchema(_) => {
                AppError::InvalidManifest(err.to_string())
            }
            IngestError::Task(msg) => AppError::Internal(msg),
        }
    }
}
