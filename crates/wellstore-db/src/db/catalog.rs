use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use wellstore_core::{
    models::{Category, Vendor},
    AppError, CategoryLookup, VendorLookup,
};

/// Repository for product categories
#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "categories", db.operation = "insert"))]
    pub async fn create_category(&self, name: &str) -> Result<Category, AppError> {
        let category = sqlx::query_as::<Postgres, Category>(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(name.trim())
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    #[tracing::instrument(skip(self), fields(db.table = "categories", db.operation = "select"))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<Postgres, Category>(
            "SELECT id, name, created_at FROM categories ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Case-insensitive lookup by name
    #[tracing::instrument(skip(self), fields(db.table = "categories", db.operation = "select"))]
    pub async fn find_id_by_name(&self, name: &str) -> Result<Option<Uuid>, AppError> {
        let id = sqlx::query_scalar::<Postgres, Uuid>(
            "SELECT id FROM categories WHERE LOWER(name) = LOWER($1) ORDER BY created_at ASC LIMIT 1",
        )
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(id)
    }
}

#[async_trait]
impl CategoryLookup for CategoryRepository {
    async fn find_category_id(&self, name: &str) -> Result<Option<Uuid>, AppError> {
        self.find_id_by_name(name).await
    }
}

/// Repository for vendors
#[derive(Clone)]
pub struct VendorRepository {
    pool: PgPool,
}

impl VendorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "vendors", db.operation = "insert"))]
    pub async fn create_vendor(&self, name: &str) -> Result<Vendor, AppError> {
        let vendor = sqlx::query_as::<Postgres, Vendor>(
            r#"
            INSERT INTO vendors (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(name.trim())
        .fetch_one(&self.pool)
        .await?;

        Ok(vendor)
    }

    #[tracing::instrument(skip(self), fields(db.table = "vendors", db.operation = "select"))]
    pub async fn list_vendors(&self) -> Result<Vec<Vendor>, AppError> {
        let vendors = sqlx::query_as::<Postgres, Vendor>(
            "SELECT id, name, created_at FROM vendors ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vendors)
    }

    /// Case-insensitive lookup by name
    #[tracing::instrument(skip(self), fields(db.table = "vendors", db.operation = "select"))]
    pub async fn find_id_by_name(&self, name: &str) -> Result<Option<Uuid>, AppError> {
        let id = sqlx::query_scalar::<Postgres, Uuid>(
            "SELECT id FROM vendors WHERE LOWER(name) = LOWER($1) ORDER BY created_at ASC LIMIT 1",
        )
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(id)
    }
}

#[async_trait]
impl VendorLookup for VendorRepository {
    async fn find_vendor_id(&self, name: &str) -> Result<Option<Uuid>, AppError> {
        self.find_id_by_name(name).await
    }
}
