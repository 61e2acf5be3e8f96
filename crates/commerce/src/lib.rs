//! # Storefront Commerce Crate
//!
//! The cart and checkout core of the storefront: saved addresses, cart
//! lines keyed by product, and a checkout that validates a snapshot and
//! commits the wallet debit with a compare-and-swap on the user's version
//! stamp.
//!
//! ## Architecture
//!
//! - **Entities**: domain models (Product, Address, Cart, ...)
//! - **Repositories**: SQLite data access
//! - **Services**: ownership checks and business rules
//! - **Types**: errors and the caller identity
//!
//! ## Usage
//!
//! ```no_run
//! # async fn demo(pool: sqlx::SqlitePool, identity: storefront_commerce::Identity) -> storefront_commerce::StoreResult<()> {
//! use storefront_commerce::{CartIntent, CartService, CheckoutService};
//! use storefront_config::CartConfig;
//!
//! let config = CartConfig::default();
//! let carts = CartService::new(pool.clone(), &config);
//! carts.upsert_item(&identity, "lamp-01", 2, CartIntent::Add).await?;
//!
//! let receipt = CheckoutService::new(pool, &config).checkout(&identity).await?;
//! println!("charged {}", receipt.charged);
//! # Ok(())
//! # }
//! ```

pub mod entities;
pub mod repositories;
pub mod services;
pub mod types;

pub use entities::{
    Address, Cart, CartEntry, CartIntent, CartLine, Product, Projection, QuantityChange,
    UserProfile, UserView,
};
pub use services::{
    compute_total, AddressService, CartService, CatalogService, CheckoutReceipt, CheckoutService,
    IdentityService,
};
pub use types::{belongs_to, Identity, StoreError, StoreResult};
