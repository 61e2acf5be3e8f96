#![allow(dead_code)]

use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};
use storefront_auth::Authenticator;
use storefront_commerce::{
    AddressService, CartService, CatalogService, CheckoutService, Identity, IdentityService,
    Product,
};
use storefront_config::{AuthConfig, CartConfig};
use tempfile::TempDir;

pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

pub struct TestContext {
    pub pool: SqlitePool,
    pub authenticator: Authenticator,
    pub identities: IdentityService,
    pub addresses: AddressService,
    pub carts: CartService,
    pub catalog: CatalogService,
    pub checkout: CheckoutService,
    _temp_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> TestResult<Self> {
        let temp_dir = TempDir::new()?;
        let db_path = temp_dir.path().join("commerce.sqlite");
        let db_url = format!("sqlite://{}", db_path.display());

        let options = SqliteConnectOptions::from_str(&db_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        MIGRATOR.run(&pool).await?;

        let cart_config = CartConfig::default();

        Ok(Self {
            authenticator: Authenticator::new(pool.clone(), AuthConfig::default()),
            identities: IdentityService::new(pool.clone()),
            addresses: AddressService::new(pool.clone(), &cart_config),
            carts: CartService::new(pool.clone(), &cart_config),
            catalog: CatalogService::new(pool.clone()),
            checkout: CheckoutService::new(pool.clone(), &cart_config),
            pool,
            _temp_dir: temp_dir,
        })
    }

    pub async fn register(&self, name: &str, email: &str) -> TestResult<Identity> {
        let user = self
            .authenticator
            .register_with_password(name, email, "s3cretpass")
            .await?;
        Ok(Identity::from(&user))
    }

    pub async fn set_wallet(&self, identity: &Identity, amount: i64) -> TestResult {
        sqlx::query("UPDATE users SET wallet_money = ? WHERE id = ?")
            .bind(amount.to_string())
            .bind(identity.user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn wallet(&self, identity: &Identity) -> TestResult<Decimal> {
        let raw: String = sqlx::query_scalar("SELECT wallet_money FROM users WHERE id = ?")
            .bind(identity.user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(Decimal::from_str(&raw)?)
    }

    pub async fn version(&self, identity: &Identity) -> TestResult<i64> {
        let version = sqlx::query_scalar("SELECT version FROM users WHERE id = ?")
            .bind(identity.user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(version)
    }

    pub async fn seed_product(&self, id: &str, cost: i64) -> TestResult<Product> {
        let product = product(id, cost);
        self.catalog.import(std::slice::from_ref(&product)).await?;
        Ok(product)
    }
}

pub fn product(id: &str, cost: i64) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {id}"),
        category: "Gadgets".to_string(),
        cost: Decimal::from(cost),
        rating: 4,
        image: format!("https://img.example/{id}.png"),
    }
}

pub const HOME: &str = "221B Baker Street, London NW1 6XE";
