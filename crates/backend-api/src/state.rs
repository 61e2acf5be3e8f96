use sqlx::SqlitePool;
use storefront_auth::{AuthSession, Authenticator, User};
use storefront_commerce::{
    AddressService, CartService, CatalogService, CheckoutService, Identity, IdentityService,
};
use storefront_config::CartConfig;

use crate::ApiError;

#[derive(Clone)]
pub struct AppState {
    authenticator: Authenticator,
    identities: IdentityService,
    addresses: AddressService,
    carts: CartService,
    catalog: CatalogService,
    checkout: CheckoutService,
}

impl AppState {
    pub fn new(pool: SqlitePool, authenticator: Authenticator, cart: &CartConfig) -> Self {
        Self {
            authenticator,
            identities: IdentityService::new(pool.clone()),
            addresses: AddressService::new(pool.clone(), cart),
            carts: CartService::new(pool.clone(), cart),
            catalog: CatalogService::new(pool.clone()),
            checkout: CheckoutService::new(pool, cart),
        }
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    pub fn identities(&self) -> &IdentityService {
        &self.identities
    }

    pub fn addresses(&self) -> &AddressService {
        &self.addresses
    }

    pub fn carts(&self) -> &CartService {
        &self.carts
    }

    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    pub fn checkout(&self) -> &CheckoutService {
        &self.checkout
    }

    pub async fn authenticate(&self, token: &str) -> Result<(User, AuthSession), ApiError> {
        self.authenticator
            .authenticate_token(token)
            .await
            .map_err(ApiError::from)
    }

    /// Resolves a bearer token to the caller identity used by the commerce core.
    pub async fn identity(&self, token: &str) -> Result<Identity, ApiError> {
        let (user, _) = self.authenticate(token).await?;
        Ok(Identity::from(&user))
    }
}
