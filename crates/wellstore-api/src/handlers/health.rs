//! Liveness and readiness probes

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::state::HealthState;

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);
/// Probe key for the storage check; it need not exist
const STORAGE_PROBE_KEY: &str = "products/.health";

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: String,
    pub storage: String,
}

/// Run an async check with a timeout: "healthy", "timeout" or "{prefix}: {error}".
async fn run_check<F, E>(f: F, error_prefix: &str) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(CHECK_TIMEOUT, f).await {
        Ok(Ok(())) => "healthy".to_string(),
        Ok(Err(e)) => format!("{}: {}", error_prefix, e),
        Err(_) => "timeout".to_string(),
    }
}

/// Liveness probe: the process is up.
pub async fn liveness_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "alive" })))
}

/// Readiness probe: database and storage respond.
pub async fn readiness_check(State(health): State<HealthState>) -> impl IntoResponse {
    let database = run_check(
        async {
            sqlx::query("SELECT 1")
                .execute(&health.pool)
                .await
                .map(|_| ())
        },
        "unhealthy",
    )
    .await;

    let storage = run_check(
        async { health.storage.exists(STORAGE_PROBE_KEY).await.map(|_| ()) },
        "unhealthy",
    )
    .await;

    let ready = database == "healthy" && storage == "healthy";
    if !ready {
        tracing::warn!(database = %database, storage = %storage, "Readiness check failed");
    }

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadinessResponse {
            status: if ready { "ready" } else { "not_ready" },
            database,
            storage,
        }),
    )
}
