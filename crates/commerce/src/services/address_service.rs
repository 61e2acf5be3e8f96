//! Address book management.

use sqlx::SqlitePool;
use storefront_config::CartConfig;
use tracing::info;

use super::owned_user;
use crate::entities::Address;
use crate::repositories::{AddressRepository, UserRepository};
use crate::types::{Identity, StoreError, StoreResult};

#[derive(Clone)]
pub struct AddressService {
    users: UserRepository,
    addresses: AddressRepository,
    min_length: usize,
}

impl AddressService {
    pub fn new(pool: SqlitePool, config: &CartConfig) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            addresses: AddressRepository::new(pool),
            min_length: config.min_address_length,
        }
    }

    pub async fn list_addresses(
        &self,
        identity: &Identity,
        user_id: &str,
    ) -> StoreResult<Vec<Address>> {
        let user = owned_user(&self.users, identity, user_id).await?;
        self.addresses.list_for_user(user.id).await
    }

    pub async fn add_address(
        &self,
        identity: &Identity,
        user_id: &str,
        text: &str,
    ) -> StoreResult<Address> {
        let user = owned_user(&self.users, identity, user_id).await?;
        let text = self.validate_text(text)?;
        self.addresses.create(user.id, text).await
    }

    pub async fn delete_address(
        &self,
        identity: &Identity,
        user_id: &str,
        address_id: &str,
    ) -> StoreResult<()> {
        let user = owned_user(&self.users, identity, user_id).await?;

        if !self.addresses.delete(user.id, address_id).await? {
            return Err(StoreError::not_found("address", address_id));
        }

        info!(user = %user.public_id, address = %address_id, "deleted address");
        Ok(())
    }

    /// Overwrites the single free-text address kept on the user record.
    pub async fn set_legacy_address(
        &self,
        identity: &Identity,
        user_id: &str,
        text: &str,
    ) -> StoreResult<String> {
        let user = owned_user(&self.users, identity, user_id).await?;
        let text = self.validate_text(text)?;

        if !self.users.set_legacy_address(user.id, Some(text)).await? {
            return Err(StoreError::not_found("user", user_id));
        }

        Ok(text.to_owned())
    }

    fn validate_text<'a>(&self, text: &'a str) -> StoreResult<&'a str> {
        let trimmed = text.trim();
        if trimmed.chars().count() < self.min_length {
            return Err(StoreError::validation(format!(
                "address must be at least {} characters long",
                self.min_length
            )));
        }
        Ok(trimmed)
    }
}
