//! Category, vendor and product listing

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;
use wellstore_core::models::{Category, CreateNamedEntryRequest, Pagination, Product, Vendor};
use wellstore_core::AppError;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::CatalogState;

#[utoipa::path(
    get,
    path = "/api/v0/categories",
    tag = "catalog",
    responses((status = 200, description = "All categories, by name", body = [Category]))
)]
#[tracing::instrument(skip(catalog))]
pub async fn list_categories(
    State(catalog): State<CatalogState>,
) -> Result<Json<Vec<Category>>, HttpAppError> {
    Ok(Json(catalog.categories.list_categories().await?))
}

#[utoipa::path(
    post,
    path = "/api/v0/categories",
    tag = "catalog",
    request_body = CreateNamedEntryRequest,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Invalid name", body = ErrorResponse),
        (status = 409, description = "Category already exists", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(catalog, request))]
pub async fn create_category(
    State(catalog): State<CatalogState>,
    ValidatedJson(request): ValidatedJson<CreateNamedEntryRequest>,
) -> Result<(StatusCode, Json<Category>), HttpAppError> {
    let name = entry_name(&request)?;
    let category = catalog.categories.create_category(name).await?;
    tracing::info!(category_id = %category.id, name = %category.name, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    get,
    path = "/api/v0/vendors",
    tag = "catalog",
    responses((status = 200, description = "All vendors, by name", body = [Vendor]))
)]
#[tracing::instrument(skip(catalog))]
pub async fn list_vendors(
    State(catalog): State<CatalogState>,
) -> Result<Json<Vec<Vendor>>, HttpAppError> {
    Ok(Json(catalog.vendors.list_vendors().await?))
}

#[utoipa::path(
    post,
    path = "/api/v0/vendors",
    tag = "catalog",
    request_body = CreateNamedEntryRequest,
    responses(
        (status = 201, description = "Vendor created", body = Vendor),
        (status = 400, description = "Invalid name", body = ErrorResponse),
        (status = 409, description = "Vendor already exists", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(catalog, request))]
pub async fn create_vendor(
    State(catalog): State<CatalogState>,
    ValidatedJson(request): ValidatedJson<CreateNamedEntryRequest>,
) -> Result<(StatusCode, Json<Vendor>), HttpAppError> {
    let name = entry_name(&request)?;
    let vendor = catalog.vendors.create_vendor(name).await?;
    tracing::info!(vendor_id = %vendor.id, name = %vendor.name, "Vendor created");
    Ok((StatusCode::CREATED, Json(vendor)))
}

/// List products, newest first
#[utoipa::path(
    get,
    path = "/api/v0/products",
    tag = "products",
    params(Pagination),
    responses((status = 200, description = "Page of products", body = [Product]))
)]
#[tracing::instrument(skip(catalog))]
pub async fn list_products(
    State(catalog): State<CatalogState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Product>>, HttpAppError> {
    let products = catalog
        .products
        .list_products(page.limit(), page.offset())
        .await?;
    Ok(Json(products))
}

fn entry_name(request: &CreateNamedEntryRequest) -> Result<&str, AppError> {
    request.validate()?;
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput("name must not be blank".to_string()));
    }
    Ok(name)
}
