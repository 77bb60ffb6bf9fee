//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STORE_HOST` - Bind address (default: 127.0.0.1)
//! - `STORE_PORT` - Listen port (default: 3000)
//! - `STORE_BASE_PATH` - Path prefix the store is mounted under (default: /hw/store)
//! - `STORE_CATALOG_FILE` - JSON array of products to serve
//! - `STORE_DEMO_PRODUCTS` - Size of the generated demo catalog when no file is
//!   given (default: 5)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_BASE_PATH: &str = "/hw/store";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront server configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Path prefix for store routes, without a trailing slash (may be empty)
    pub base_path: String,
    /// Where the catalog comes from
    pub catalog: CatalogSource,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g., "production")
    pub sentry_environment: Option<String>,
}

/// Source of the products served by the catalog API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Load products from a JSON file.
    File(PathBuf),
    /// Generate this many demo products.
    Demo(u16),
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_path: DEFAULT_BASE_PATH.to_string(),
            catalog: CatalogSource::Demo(5),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STORE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("STORE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("STORE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("STORE_PORT".to_string(), e.to_string()))?;
        let base_path = normalize_base_path(&get_env_or_default("STORE_BASE_PATH", DEFAULT_BASE_PATH))
            .map_err(|e| ConfigError::InvalidEnvVar("STORE_BASE_PATH".to_string(), e))?;

        let catalog = match get_optional_env("STORE_CATALOG_FILE") {
            Some(path) => CatalogSource::File(PathBuf::from(path)),
            None => {
                let count = get_env_or_default("STORE_DEMO_PRODUCTS", "5")
                    .parse::<u16>()
                    .map_err(|e| {
                        ConfigError::InvalidEnvVar("STORE_DEMO_PRODUCTS".to_string(), e.to_string())
                    })?;
                CatalogSource::Demo(count)
            }
        };

        Ok(Self {
            host,
            port,
            base_path,
            catalog,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Public URL of the store root, as the catalog client expects it.
    #[must_use]
    pub fn store_url(&self) -> String {
        format!("http://{}{}", self.socket_addr(), self.base_path)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Normalize a mount path to `/segment/...` form with no trailing slash.
/// The root path normalizes to the empty string.
fn normalize_base_path(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if trimmed.contains(['?', '#', ' ']) {
        return Err(format!("'{raw}' is not a plain path"));
    }
    Ok(format!("/{trimmed}"))
}
