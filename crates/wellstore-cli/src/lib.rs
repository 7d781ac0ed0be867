//! Command-line client for the Wellstore admin API.

pub mod client;

pub use client::ApiClient;

use wellstore_core::models::IngestionResult;

/// One-line summary of an import, followed by the row errors.
pub fn format_import_report(result: &IngestionResult) -> String {
    let mut out = format!(
        "processed {} row(s): {} created, {} skipped",
        result.processed_rows, result.created, result.skipped
    );
    if result.cancelled {
        out.push_str(" (stopped early)");
    }
    for error in &result.errors {
        out.push_str("\n  ");
        out.push_str(error);
    }
    out
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
