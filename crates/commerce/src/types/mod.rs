//! Shared types for the commerce core.

pub mod errors;
pub mod identity;

pub use errors::{StoreError, StoreResult};
pub use identity::{belongs_to, Identity};

pub type ProductId = String;
pub type Quantity = u32;
