//! Business logic for the commerce core.

pub mod address_service;
pub mod cart_service;
pub mod catalog_service;
pub mod checkout_service;
pub mod identity_service;

pub use address_service::AddressService;
pub use cart_service::{compute_total, CartService};
pub use catalog_service::CatalogService;
pub use checkout_service::{CheckoutReceipt, CheckoutService};
pub use identity_service::IdentityService;

use tracing::warn;

use crate::entities::UserRecord;
use crate::repositories::UserRepository;
use crate::types::{belongs_to, Identity, StoreError, StoreResult};

/// Resolves `user_id` and checks that the caller owns it.
pub(crate) async fn owned_user(
    users: &UserRepository,
    identity: &Identity,
    user_id: &str,
) -> StoreResult<UserRecord> {
    let user = users
        .find_by_public_id(user_id)
        .await?
        .ok_or_else(|| StoreError::not_found("user", user_id))?;

    if !belongs_to(&user.email, identity) {
        warn!(caller = %identity.public_id, target = %user_id, "rejected access to another user");
        return Err(StoreError::Forbidden);
    }

    Ok(user)
}
