//! Bulk product import endpoints

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use tokio_util::sync::CancellationToken;
use wellstore_core::models::IngestionResult;
use wellstore_core::AppError;
use wellstore_services::build_import_template;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::ImportState;
use crate::utils::upload::extract_archive_upload;

const TEMPLATE_DOWNLOAD_NAME: &str = "product-import-template.zip";

/// Import products from a ZIP archive
///
/// The archive holds one `.csv` manifest and the images it references. Rows that
/// fail are reported in `errors` while the rest are created.
#[utoipa::path(
    post,
    path = "/api/v0/products/import",
    tag = "products",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Import finished; see per-row errors", body = IngestionResult),
        (status = 400, description = "Upload is not a readable zip archive", body = ErrorResponse),
        (status = 413, description = "Archive exceeds the size limit", body = ErrorResponse),
        (status = 415, description = "Upload is not a .zip file", body = ErrorResponse),
        (status = 422, description = "Manifest missing or header invalid", body = ErrorResponse),
        (status = 504, description = "Import stuck past the time limit", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(import, multipart))]
pub async fn import_products(
    State(import): State<ImportState>,
    multipart: Multipart,
) -> Result<Json<IngestionResult>, HttpAppError> {
    let upload = extract_archive_upload(multipart, import.max_archive_bytes).await?;
    tracing::info!(
        filename = %upload.filename,
        size_bytes = upload.data.len(),
        "Product import archive received"
    );

    let cancel = CancellationToken::new();
    // Client disconnects drop this future; stop starting new rows when that happens.
    let _cancel_on_drop = cancel.clone().drop_guard();

    let service = import.service.clone();
    let task_cancel = cancel.clone();
    let mut task =
        tokio::spawn(async move { service.import(upload.data, &task_cancel).await });

    let joined = tokio::select! {
        joined = &mut task => joined,
        _ = tokio::time::sleep(import.timeout) => {
            tracing::warn!(
                timeout_secs = import.timeout.as_secs(),
                "Product import timed out, cancelling remaining rows"
            );
            cancel.cancel();
            match tokio::time::timeout(import.cancel_grace, &mut task).await {
                Ok(joined) => joined,
                Err(_) => {
                    task.abort();
                    tracing::error!(
                        grace_secs = import.cancel_grace.as_secs(),
                        "Product import did not stop after cancellation, aborting"
                    );
                    return Err(AppError::Timeout(
                        "Import did not finish within the time limit".to_string(),
                    )
                    .into());
                }
            }
        }
    };

    let result = joined
        .map_err(|e| AppError::Internal(format!("Import task failed: {}", e)))?
        .map_err(HttpAppError::from)?;

    Ok(Json(result))
}

/// Download the import template
///
/// A ZIP with `products.csv` (header plus one example row) and an empty
/// `images/` folder.
#[utoipa::path(
    get,
    path = "/api/v0/products/import/template",
    tag = "products",
    responses(
        (status = 200, description = "Template archive", content_type = "application/zip"),
    )
)]
#[tracing::instrument]
pub async fn download_template() -> Result<impl IntoResponse, HttpAppError> {
    let archive = tokio::task::spawn_blocking(build_import_template)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to build template: {}", e)))??;

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", TEMPLATE_DOWNLOAD_NAME),
            ),
        ],
        archive,
    ))
}
