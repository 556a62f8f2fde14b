//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `TIENDA_HOST` - Bind address (default: 0.0.0.0)
//! - `TIENDA_PORT` - Listen port (default: 8080)
//! - `TIENDA_DATA_DIR` - Directory holding the collection files (default: .)
//! - `TIENDA_PRODUCTS_FILE` - Product collection file name (default: productos.json)
//! - `TIENDA_CARTS_FILE` - Cart collection file name (default: carrito.json)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_PRODUCTS_FILE: &str = "productos.json";
const DEFAULT_CARTS_FILE: &str = "carrito.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the collection files
    pub data_dir: PathBuf,
    /// Product collection file name, relative to `data_dir`
    pub products_file: String,
    /// Cart collection file name, relative to `data_dir`
    pub carts_file: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from("."),
            products_file: DEFAULT_PRODUCTS_FILE.to_string(),
            carts_file: DEFAULT_CARTS_FILE.to_string(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = match non_empty(&lookup, "TIENDA_HOST") {
            Some(raw) => raw
                .parse::<IpAddr>()
                .map_err(|e| ConfigError::InvalidEnvVar("TIENDA_HOST".to_string(), e.to_string()))?,
            None => defaults.host,
        };
        let port = match non_empty(&lookup, "TIENDA_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidEnvVar("TIENDA_PORT".to_string(), e.to_string()))?,
            None => defaults.port,
        };

        Ok(Self {
            host,
            port,
            data_dir: non_empty(&lookup, "TIENDA_DATA_DIR").map_or(defaults.data_dir, PathBuf::from),
            products_file: non_empty(&lookup, "TIENDA_PRODUCTS_FILE")
                .unwrap_or(defaults.products_file),
            carts_file: non_empty(&lookup, "TIENDA_CARTS_FILE").unwrap_or(defaults.carts_file),
            sentry_dsn: non_empty(&lookup, "SENTRY_DSN"),
            sentry_environment: non_empty(&lookup, "SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Full path of the product collection file.
    #[must_use]
    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join(&self.products_file)
    }

    /// Full path of the cart collection file.
    #[must_use]
    pub fn carts_path(&self) -> PathBuf {
        self.data_dir.join(&self.carts_file)
    }
}

/// Look up a variable, treating an empty value as unset.
fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|value| !value.trim().is_empty())
}
