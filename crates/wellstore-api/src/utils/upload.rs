//! Multipart handling for archive uploads

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::Bytes;
use wellstore_core::AppError;

use crate::constants::{ARCHIVE_CONTENT_TYPES, IMPORT_FILE_FIELD};

/// The archive part of an import request
#[derive(Debug)]
pub struct ArchiveUpload {
    pub filename: String,
    pub data: Bytes,
}

/// Pull the single `file` field out of a multipart body.
///
/// The part must be named `*.zip` and, when it declares a content type, one of
/// the zip types. Reading stops as soon as the body exceeds `max_bytes`.
pub async fn extract_archive_upload(
    mut multipart: Multipart,
    max_bytes: usize,
) -> Result<ArchiveUpload, AppError> {
    let mut upload: Option<ArchiveUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(IMPORT_FILE_FIELD) {
            continue;
        }
        if upload.is_some() {
            return Err(AppError::InvalidInput(format!(
                "Multiple '{}' fields are not allowed; send exactly one archive",
                IMPORT_FILE_FIELD
            )));
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        validate_archive_filename(&filename)?;
        validate_archive_content_type(field.content_type())?;

        let data = read_limited(field, max_bytes).await?;
        upload = Some(ArchiveUpload { filename, data });
    }

    upload.ok_or_else(|| {
        AppError::InvalidInput(format!(
            "Missing multipart field '{}' with the .zip archive",
            IMPORT_FILE_FIELD
        ))
    })
}

async fn read_limited(mut field: Field<'_>, max_bytes: usize) -> Result<Bytes, AppError> {
    let mut buffer = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if buffer.len() + chunk.len() > max_bytes {
            return Err(too_large(max_bytes));
        }
        buffer.extend_from_slice(&chunk);
    }
    Ok(Bytes::from(buffer))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Upload exceeds the request size limit: {}", err))
    } else {
        AppError::InvalidInput(format!("Failed to read multipart body: {}", err))
    }
}

fn too_large(max_bytes: usize) -> AppError {
    AppError::PayloadTooLarge(format!(
        "Archive exceeds the {} MB upload limit",
        max_bytes / 1024 / 1024
    ))
}

pub fn validate_archive_filename(filename: &str) -> Result<(), AppError> {
    let is_zip = std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));

    if is_zip {
        Ok(())
    } else {
        Err(AppError::UnsupportedMediaType(format!(
            "Expected a .zip archive, got '{}'",
            filename
        )))
    }
}

pub fn validate_archive_content_type(content_type: Option<&str>) -> Result<(), AppError> {
    let Some(content_type) = content_type else {
        return Ok(());
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if ARCHIVE_CONTENT_TYPES.contains(&essence.as_str()) {
        Ok(())
    } else {
        Err(AppError::UnsupportedMediaType(format!(
            "Content type '{}' is not a zip archive",
            content_type
        )))
    }
}
