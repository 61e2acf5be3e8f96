//! Domain entities for the commerce core

pub mod address;
pub mod cart;
pub mod product;
pub mod user;

pub use address::Address;
pub use cart::{Cart, CartEntry, CartIntent, CartLine, QuantityChange};
pub use product::Product;
pub use user::{Projection, UserProfile, UserRecord, UserView};
