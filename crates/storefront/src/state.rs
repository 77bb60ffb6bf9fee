//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::{CatalogError, StaticCatalog, demo_products};
use crate::config::{CatalogSource, StorefrontConfig};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the configuration and the catalog being served.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: StaticCatalog,
}

impl AppState {
    /// Create application state, loading the configured catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if a catalog file is configured and cannot be loaded.
    pub fn new(config: StorefrontConfig) -> Result<Self, CatalogError> {
        let catalog = match &config.catalog {
            CatalogSource::File(path) => StaticCatalog::from_json_file(path)?,
            CatalogSource::Demo(count) => StaticCatalog::new(demo_products(*count)),
        };
        Ok(Self::with_catalog(config, catalog))
    }

    /// Create application state serving an existing catalog.
    #[must_use]
    pub fn with_catalog(config: StorefrontConfig, catalog: StaticCatalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog being served.
    #[must_use]
    pub fn catalog(&self) -> &StaticCatalog {
        &self.inner.catalog
    }
}
