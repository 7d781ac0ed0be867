use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use wellstore_core::{
    models::{NewProduct, Product},
    AppError, ProductGateway,
};

const PRODUCT_COLUMNS: &str = "id, title, category_id, vendor_id, price, description, keywords, stock, image_key, image_url, created_at";

/// Repository for catalog products
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert one product. A single statement, so the row is all-or-nothing.
    #[tracing::instrument(skip(self, product), fields(db.table = "products", db.operation = "insert", product.title = %product.title))]
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, AppError> {
        let query = format!(
            r#"
            INSERT INTO products (title, category_id, vendor_id, price, description, keywords, stock, image_key, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        );

        let created = sqlx::query_as::<Postgres, Product>(&query)
            .bind(&product.title)
            .bind(product.category_id)
            .bind(product.vendor_id)
            .bind(product.price)
            .bind(&product.description)
            .bind(&product.keywords)
            .bind(product.stock)
            .bind(&product.image_key)
            .bind(&product.image_url)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    #[tracing::instrument(skip(self), fields(db.table = "products", db.operation = "select"))]
    pub async fn list_products(&self, limit: i64, offset: i64) -> Result<Vec<Product>, AppError> {
        let query = format!(
            "SELECT {} FROM products ORDER BY created_at DESC, id ASC LIMIT $1 OFFSET $2",
            PRODUCT_COLUMNS
        );

        let products = sqlx::query_as::<Postgres, Product>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }
}

#[async_trait]
impl ProductGateway for ProductRepository {
    async fn insert_product(&self, product: &NewProduct) -> Result<Uuid, AppError> {
        self.create_product(product).await.map(|p| p.id)
    }
}
