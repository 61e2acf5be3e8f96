//! Catalog lookups and bulk import.

use sqlx::SqlitePool;
use tracing::info;

use crate::entities::Product;
use crate::repositories::ProductRepository;
use crate::types::{StoreError, StoreResult};

#[derive(Clone)]
pub struct CatalogService {
    products: ProductRepository,
}

impl CatalogService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            products: ProductRepository::new(pool),
        }
    }

    pub async fn list_products(&self) -> StoreResult<Vec<Product>> {
        self.products.list().await
    }

    pub async fn get_product(&self, product_id: &str) -> StoreResult<Product> {
        self.products
            .find(product_id)
            .await?
            .ok_or_else(|| StoreError::not_found("product", product_id))
    }

    pub async fn search_products(&self, value: &str) -> StoreResult<Vec<Product>> {
        if value.trim().is_empty() {
            return self.products.list().await;
        }
        self.products.search(value).await
    }

    /// Validates every product, then upserts them all or none.
    pub async fn import(&self, products: &[Product]) -> StoreResult<u64> {
        for product in products {
            product.validate()?;
        }

        let written = self.products.upsert_many(products).await?;
        info!(count = products.len(), written, "imported catalog");
        Ok(written)
    }
}
