//! Bulk product import: typed manifest rows and the per-upload report.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Manifest header, in the order the import template writes it.
pub const MANIFEST_COLUMNS: [&str; 8] = [
    "title",
    "category",
    "vendor",
    "price",
    "description",
    "keywords",
    "stock",
    "image",
];

/// Columns whose absence rejects the whole manifest.
pub const REQUIRED_COLUMNS: [&str; 4] = ["title", "category", "vendor", "price"];

/// One data row of the import manifest after parsing.
///
/// `index` is the 1-based position among non-empty data rows and is what
/// error messages cite.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ProductRow {
    pub index: usize,
    #[validate(length(
        min = 3,
        max = 200,
        message = "title must be between 3 and 200 characters"
    ))]
    pub title: String,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "vendor is required"))]
    pub vendor: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub keywords: Option<String>,
    #[validate(range(min = 0, message = "stock must not be negative"))]
    pub stock: i32,
    pub image: Option<String>,
}

impl ProductRow {
    /// Run field validation and return the first failure in column order.
    pub fn check(&self) -> Result<(), String> {
        let errors = self.validate().err();
        let field_message = |field: &str| -> Option<String> {
            let errors = errors.as_ref()?;
            let field_errors = errors.field_errors();
            let first = field_errors.get(field)?.first()?;
            Some(
                first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("invalid {}", field)),
            )
        };

        for field in ["title", "category", "vendor"] {
            if let Some(msg) = field_message(field) {
                return Err(msg);
            }
        }
        if self.price < Decimal::ZERO {
            return Err("price must not be negative".to_string());
        }
        if let Some(msg) = field_message("stock") {
            return Err(msg);
        }
        Ok(())
    }

    /// Comma-separated keywords as a list, trimmed, blanks dropped.
    pub fn keyword_list(&self) -> Vec<String> {
        self.keywords
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Report returned for one upload. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngestionResult {
    pub processed_rows: usize,
    pub created: usize,
    pub skipped: usize,
    /// `Row N: reason`, in source order
    pub errors: Vec<String>,
    /// Set when the import stopped before the end of the manifest
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cancelled: bool,
}

impl IngestionResult {
    pub fn record_created(&mut self) {
        self.processed_rows += 1;
        self.created += 1;
    }

    pub fn record_skipped(&mut self, index: usize, reason: impl AsRef<str>) {
        self.processed_rows += 1;
        self.skipped += 1;
        self.errors.push(format!("Row {}: {}", index, reason.as_ref()));
    }
}
