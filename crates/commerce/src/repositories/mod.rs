//! Data access for the commerce core.
//!
//! Methods on the repository structs run against the pool. The free
//! functions take a `SqliteConnection` so services can compose them inside
//! one transaction.

pub mod address_repository;
pub mod cart_repository;
pub mod product_repository;
pub mod user_repository;

pub use address_repository::AddressRepository;
pub use cart_repository::CartRepository;
pub use product_repository::ProductRepository;
pub use user_repository::UserRepository;

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::types::{StoreError, StoreResult};

/// Money columns are stored as decimal TEXT.
pub(crate) fn parse_money(column: &str, raw: &str) -> StoreResult<Decimal> {
    Decimal::from_str(raw)
        .map_err(|e| StoreError::corrupt(format!("{column} value {raw:?}: {e}")))
}

pub(crate) fn parse_rating(raw: i64) -> StoreResult<u8> {
    u8::try_from(raw).map_err(|_| StoreError::corrupt(format!("rating value {raw}")))
}

pub(crate) fn parse_quantity(raw: i64) -> StoreResult<u32> {
    u32::try_from(raw).map_err(|_| StoreError::corrupt(format!("quantity value {raw}")))
}
