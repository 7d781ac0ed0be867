use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 500;

/// Product as stored in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub category_id: Uuid,
    pub vendor_id: Uuid,
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub stock: i32,
    pub image_key: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fully resolved product ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub category_id: Uuid,
    pub vendor_id: Uuid,
    pub price: Decimal,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub stock: i32,
    pub image_key: Option<String>,
    pub image_url: Option<String>,
}

/// Limit/offset pagination shared by list endpoints
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Pagination {
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}
