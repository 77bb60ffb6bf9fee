//! Product catalog access.
//!
//! The catalog is read-only from the storefront's point of view: a list of
//! product summaries and a detail record per product. [`CatalogClient`] is the
//! seam between the state container and wherever products come from.
//!
//! # Implementations
//!
//! - [`HttpCatalogClient`] - the product API over HTTP (`reqwest`)
//! - [`StaticCatalog`] - a fixed in-memory product list; backs the API server
//!   and tests

mod http;
mod static_catalog;

pub use http::HttpCatalogClient;
pub use static_catalog::{StaticCatalog, demo_products};

use std::future::Future;

use example_store_core::{Product, ProductId, ProductSummary};
use thiserror::Error;

/// Errors that can occur when fetching from the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product has this id.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Catalog API returned status {0}")]
    Status(u16),

    /// Response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured API URL is unusable.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Reading a catalog file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Whether this is a missing product rather than a transport failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Read access to the product catalog.
///
/// Implementations do not cache; every call goes to the source.
pub trait CatalogClient: Send + Sync {
    /// Fetch every product summary. A transport error fails the whole list.
    fn fetch_product_summaries(
        &self,
    ) -> impl Future<Output = Result<Vec<ProductSummary>, CatalogError>> + Send;

    /// Fetch one product. Unknown ids yield [`CatalogError::NotFound`].
    fn fetch_product_by_id(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send;
}
