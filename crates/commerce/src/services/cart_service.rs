//! Cart mutation engine.

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use storefront_config::CartConfig;
use tracing::debug;

use crate::entities::{Cart, CartIntent, CartLine, QuantityChange};
use crate::repositories::{CartRepository, ProductRepository};
use crate::types::{Identity, Quantity, StoreError, StoreResult};

/// Sum of `cost * quantity` over the lines. Zero for no lines.
pub fn compute_total<'a, I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = &'a CartLine>,
{
    lines
        .into_iter()
        .map(CartLine::subtotal)
        .fold(Decimal::ZERO, |total, subtotal| total + subtotal)
}

#[derive(Clone)]
pub struct CartService {
    carts: CartRepository,
    products: ProductRepository,
    max_line_quantity: Quantity,
}

impl CartService {
    pub fn new(pool: SqlitePool, config: &CartConfig) -> Self {
        Self {
            carts: CartRepository::new(pool.clone()),
            products: ProductRepository::new(pool),
            max_line_quantity: config.max_line_quantity.max(1),
        }
    }

    pub async fn get_cart(&self, identity: &Identity) -> StoreResult<Cart> {
        self.carts.load(identity.user_id).await
    }

    pub async fn upsert_item(
        &self,
        identity: &Identity,
        product_id: &str,
        quantity: i64,
        intent: CartIntent,
    ) -> StoreResult<Cart> {
        let quantity = self.validate_quantity(quantity)?;

        self.carts
            .write_line(identity.user_id, product_id, quantity, intent)
            .await?;

        debug!(user = %identity.public_id, product = %product_id, quantity, ?intent, "wrote cart line");
        self.carts.load(identity.user_id).await
    }

    /// Like `upsert_item` with [`CartIntent::Update`], except that a quantity
    /// of zero removes the line. The product must exist in the catalog either
    /// way; removing an absent line of a known product is not an error.
    pub async fn set_quantity(
        &self,
        identity: &Identity,
        product_id: &str,
        quantity: i64,
    ) -> StoreResult<QuantityChange> {
        if quantity == 0 {
            if self.products.find(product_id).await?.is_none() {
                return Err(StoreError::not_found("product", product_id));
            }
            self.carts.delete_line(identity.user_id, product_id).await?;
            return Ok(QuantityChange::Removed);
        }

        self.upsert_item(identity, product_id, quantity, CartIntent::Update)
            .await
            .map(QuantityChange::Updated)
    }

    pub async fn remove_item(&self, identity: &Identity, product_id: &str) -> StoreResult<()> {
        if !self.carts.delete_line(identity.user_id, product_id).await? {
            return Err(StoreError::not_found("cart item", product_id));
        }
        Ok(())
    }

    fn validate_quantity(&self, quantity: i64) -> StoreResult<Quantity> {
        match Quantity::try_from(quantity) {
            Ok(q) if (1..=self.max_line_quantity).contains(&q) => Ok(q),
            _ => Err(StoreError::validation(format!(
                "quantity must be between 1 and {}",
                self.max_line_quantity
            ))),
        }
    }
}
