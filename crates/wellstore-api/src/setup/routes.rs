//! Route configuration and setup

use crate::constants::{API_PREFIX, MULTIPART_OVERHEAD_BYTES, OPENAPI_JSON_PATH};
use crate::handlers::{catalog, health, import, messages};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, patch, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use wellstore_core::Config;
use wellstore_infra::{request_id_middleware, security_headers_middleware};

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let app = Router::new()
        .merge(health_routes())
        .merge(product_routes(state.import.max_archive_bytes))
        .merge(catalog_routes())
        .merge(message_routes())
        .route(
            OPENAPI_JSON_PATH,
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .merge(utoipa_rapidoc::RapiDoc::new(OPENAPI_JSON_PATH).path("/docs"))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::OPTIONS,
    ];

    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}

fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::liveness_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Product routes. The import endpoint lifts axum's default body limit to the
/// configured archive ceiling.
fn product_routes(max_archive_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/products/import", API_PREFIX),
            post(import::import_products).layer(DefaultBodyLimit::max(
                max_archive_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES),
            )),
        )
        .route(
            &format!("{}/products/import/template", API_PREFIX),
            get(import::download_template),
        )
        .route(
            &format!("{}/products", API_PREFIX),
            get(catalog::list_products),
        )
}

fn catalog_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/categories", API_PREFIX),
            get(catalog::list_categories).post(catalog::create_category),
        )
        .route(
            &format!("{}/vendors", API_PREFIX),
            get(catalog::list_vendors).post(catalog::create_vendor),
        )
}

fn message_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/messages", API_PREFIX),
            post(messages::create_message).get(messages::list_messages),
        )
        .route(
            &format!("{}/messages/counts", API_PREFIX),
            get(messages::message_counts),
        )
        .route(
            &format!("{}/messages/{{id}}", API_PREFIX),
            get(messages::get_message),
        )
        .route(
            &format!("{}/messages/{{id}}/status", API_PREFIX),
            patch(messages::update_message_status),
        )
}
