//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SMARTCART_CATALOG_URL` - URL of the static catalog JSON document
//!
//! ## Optional
//! - `SMARTCART_HOST` - Bind address (default: 127.0.0.1)
//! - `SMARTCART_PORT` - Listen port (default: 3000)
//! - `SMARTCART_STORAGE_PATH` - Durable key-value storage file
//!   (default: data/storage.json)
//! - `SMARTCART_SHIPPING_FEE` - Flat shipping fee for non-empty carts
//!   (default: 10.00)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

use smartcart_core::pricing::DEFAULT_SHIPPING_FEE;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// URL of the catalog JSON document
    pub catalog_url: String,
    /// Path of the durable key-value storage file
    pub storage_path: PathBuf,
    /// Flat shipping fee charged on non-empty carts
    pub shipping_fee: Decimal,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or any
    /// value fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors - it's optional)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("SMARTCART_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SMARTCART_HOST".to_owned(), e.to_string()))?;

        let port = get_env_or_default("SMARTCART_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SMARTCART_PORT".to_owned(), e.to_string()))?;

        let catalog_url = validate_catalog_url(&get_required_env("SMARTCART_CATALOG_URL")?)?;

        let storage_path = PathBuf::from(get_env_or_default(
            "SMARTCART_STORAGE_PATH",
            "data/storage.json",
        ));

        let shipping_fee = match std::env::var("SMARTCART_SHIPPING_FEE") {
            Ok(raw) => parse_shipping_fee(&raw)?,
            Err(_) => DEFAULT_SHIPPING_FEE,
        };

        Ok(Self {
            host,
            port,
            catalog_url,
            storage_path,
            shipping_fee,
        })
    }

    /// The socket address to bind the server to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get an environment variable with a default fallback.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Validate that the catalog URL parses as an absolute URL.
fn validate_catalog_url(raw: &str) -> Result<String, ConfigError> {
    url::Url::parse(raw)
        .map(|_| raw.to_owned())
        .map_err(|e| ConfigError::InvalidEnvVar("SMARTCART_CATALOG_URL".to_owned(), e.to_string()))
}

/// Parse the flat shipping fee, rejecting negative values.
fn parse_shipping_fee(raw: &str) -> Result<Decimal, ConfigError> {
    let fee = raw.parse::<Decimal>().map_err(|e| {
        ConfigError::InvalidEnvVar("SMARTCART_SHIPPING_FEE".to_owned(), e.to_string())
    })?;

    if fee < Decimal::ZERO {
        return Err(ConfigError::InvalidEnvVar(
            "SMARTCART_SHIPPING_FEE".to_owned(),
            "must not be negative".to_owned(),
        ));
    }
    Ok(fee)
}
