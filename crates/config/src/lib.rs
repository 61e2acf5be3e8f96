use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "storefront.toml",
    "config/storefront.toml",
    "crates/config/storefront.toml",
    "../storefront.toml",
    "../config/storefront.toml",
    "../crates/config/storefront.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub cart: CartConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8082,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://storefront.db".to_string(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "AuthConfig::default_session_ttl")]
    pub session_ttl_seconds: u64,
    /// Wallet balance credited to every newly registered account.
    #[serde(default = "AuthConfig::default_starting_wallet_money")]
    pub starting_wallet_money: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_seconds: Self::default_session_ttl(),
            starting_wallet_money: Self::default_starting_wallet_money(),
        }
    }
}

impl AuthConfig {
    const fn default_session_ttl() -> u64 {
        86_400
    }

    const fn default_starting_wallet_money() -> u64 {
        500
    }
}

/// Limits applied by the cart and checkout engine.
///
/// ```
/// use storefront_config::CartConfig;
///
/// let cart = CartConfig::default();
/// assert_eq!(cart.max_line_quantity, 10);
/// assert_eq!(cart.min_address_length, 20);
/// assert_eq!(cart.checkout_max_attempts, 5);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default = "CartConfig::default_max_line_quantity")]
    pub max_line_quantity: u32,
    #[serde(default = "CartConfig::default_min_address_length")]
    pub min_address_length: usize,
    #[serde(default = "CartConfig::default_checkout_max_attempts")]
    pub checkout_max_attempts: u32,
}

impl CartConfig {
    const fn default_max_line_quantity() -> u32 {
        10
    }

    const fn default_min_address_length() -> usize {
        20
    }

    const fn default_checkout_max_attempts() -> u32 {
        5
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            max_line_quantity: Self::default_max_line_quantity(),
            min_address_length: Self::default_min_address_length(),
            checkout_max_attempts: Self::default_checkout_max_attempts(),
        }
    }
}

fn clamp_to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use storefront_config::load;
///
/// std::env::remove_var("STOREFRONT_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())?
        .set_default("http.port", i64::from(defaults.http.port))?
        .set_default("database.url", defaults.database.url.clone())?
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )?
        .set_default(
            "auth.session_ttl_seconds",
            clamp_to_i64(defaults.auth.session_ttl_seconds),
        )?
        .set_default(
            "auth.starting_wallet_money",
            clamp_to_i64(defaults.auth.starting_wallet_money),
        )?
        .set_default(
            "cart.max_line_quantity",
            i64::from(defaults.cart.max_line_quantity),
        )?
        .set_default(
            "cart.min_address_length",
            clamp_to_i64(defaults.cart.min_address_length as u64),
        )?
        .set_default(
            "cart.checkout_max_attempts",
            i64::from(defaults.cart.checkout_max_attempts),
        )?;

    let environment_overrides = config::Environment::with_prefix("STOREFRONT").separator("__");

    let mut builder = builder;
    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("STOREFRONT_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via STOREFRONT_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    if config.auth.session_ttl_seconds > i64::MAX as u64 {
        config.auth.session_ttl_seconds = i64::MAX as u64;
    }

    if config.cart.checkout_max_attempts == 0 {
        config.cart.checkout_max_attempts = 1;
    }

    debug!(?config, "loaded storefront configuration");
    Ok(config)
}
