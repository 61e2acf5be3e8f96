//! Read path for user records.

use sqlx::SqlitePool;

use super::owned_user;
use crate::entities::{Projection, UserProfile, UserView};
use crate::repositories::{AddressRepository, UserRepository};
use crate::types::{Identity, StoreResult};

#[derive(Clone)]
pub struct IdentityService {
    users: UserRepository,
    addresses: AddressRepository,
}

impl IdentityService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            addresses: AddressRepository::new(pool),
        }
    }

    pub async fn get_user(
        &self,
        identity: &Identity,
        user_id: &str,
        projection: Projection,
    ) -> StoreResult<UserView> {
        let user = owned_user(&self.users, identity, user_id).await?;

        match projection {
            Projection::AddressOnly => Ok(UserView::AddressOnly {
                address: user.legacy_address,
            }),
            Projection::Full => {
                let addresses = self.addresses.list_for_user(user.id).await?;
                Ok(UserView::Full(UserProfile {
                    id: user.public_id,
                    name: user.name,
                    email: user.email,
                    wallet_money: user.wallet_money,
                    address: user.legacy_address,
                    addresses,
                }))
            }
        }
    }
}
