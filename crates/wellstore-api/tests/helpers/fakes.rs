//! In-memory collaborators for the import service.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;
use wellstore_core::models::NewProduct;
use wellstore_core::{AppError, CategoryLookup, ProductGateway, VendorLookup};

pub struct FakeCatalog {
    categories: HashMap<String, Uuid>,
    vendors: HashMap<String, Uuid>,
}

impl FakeCatalog {
    /// Categories `Beverages` and `Gear`, vendor `Acme`
    pub fn with_defaults() -> Self {
        let ids = |names: &[&str]| -> HashMap<String, Uuid> {
            names
                .iter()
                .map(|name| (name.to_lowercase(), Uuid::new_v4()))
                .collect()
        };
        Self {
            categories: ids(&["Beverages", "Gear"]),
            vendors: ids(&["Acme"]),
        }
    }
}

#[async_trait]
impl CategoryLookup for FakeCatalog {
    async fn find_category_id(&self, name: &str) -> Result<Option<Uuid>, AppError> {
        Ok(self.categories.get(&name.to_lowercase()).copied())
    }
}

#[async_trait]
impl VendorLookup for FakeCatalog {
    async fn find_vendor_id(&self, name: &str) -> Result<Option<Uuid>, AppError> {
        Ok(self.vendors.get(&name.to_lowercase()).copied())
    }
}

#[derive(Default)]
pub struct FakeProducts {
    inserted: Mutex<Vec<NewProduct>>,
    insert_delay: Option<Duration>,
}

impl FakeProducts {
    /// Every insert sleeps for `delay` before it is recorded
    pub fn slow(delay: Duration) -> Self {
        Self {
            inserted: Mutex::new(Vec::new()),
            insert_delay: Some(delay),
        }
    }

    pub fn inserted(&self) -> Vec<NewProduct> {
        self.inserted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductGateway for FakeProducts {
    async fn insert_product(&self, product: &NewProduct) -> Result<Uuid, AppError> {
        if let Some(delay) = self.insert_delay {
            tokio::time::sleep(delay).await;
        }
        self.inserted.lock().unwrap().push(product.clone());
        Ok(Uuid::new_v4())
    }
}
