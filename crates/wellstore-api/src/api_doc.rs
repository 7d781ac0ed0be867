//! OpenAPI documentation, served at `/api/openapi.json` and rendered by RapiDoc at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use wellstore_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wellstore Admin API",
        version = "0.1.0",
        description = "Admin console API for the Wellstore catalog: bulk product import from ZIP archives, category and vendor lookups, and the contact inbox. All endpoints are versioned under /api/v0/."
    ),
    paths(
        // Products
        handlers::import::import_products,
        handlers::import::download_template,
        handlers::catalog::list_products,
        // Catalog
        handlers::catalog::list_categories,
        handlers::catalog::create_category,
        handlers::catalog::list_vendors,
        handlers::catalog::create_vendor,
        // Messages
        handlers::messages::create_message,
        handlers::messages::list_messages,
        handlers::messages::message_counts,
        handlers::messages::get_message,
        handlers::messages::update_message_status,
    ),
    components(
        schemas(
            models::Product,
            models::Category,
            models::Vendor,
            models::CreateNamedEntryRequest,
            models::IngestionResult,
            models::ContactMessage,
            models::CreateMessageRequest,
            models::UpdateMessageStatusRequest,
            models::MessageStatus,
            models::MessageStatusCounts,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "products", description = "Bulk import and product listing"),
        (name = "catalog", description = "Categories and vendors referenced by imported products"),
        (name = "messages", description = "Contact inbox and its status workflow")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_import_paths() {
        let spec = get_openapi_spec();
        assert!(spec.paths.paths.contains_key("/api/v0/products/import"));
        assert!(spec.paths.paths.contains_key("/api/v0/messages/{id}/status"));
    }
}
