//! API constants

/// Where the OpenAPI document is served
pub const OPENAPI_JSON_PATH: &str = "/api/openapi.json";

/// Versioned prefix every resource route is mounted under
pub const API_PREFIX: &str = "/api/v0";

/// Multipart field carrying the import archive
pub const IMPORT_FILE_FIELD: &str = "file";

/// Content types accepted for the import archive
pub const ARCHIVE_CONTENT_TYPES: [&str; 3] = [
    "application/zip",
    "application/x-zip-compressed",
    "application/octet-stream",
];

/// How long a timed-out import may take to finish its current row
pub const IMPORT_CANCEL_GRACE_SECS: u64 = 10;

/// Slack on top of the archive limit for multipart framing
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;
