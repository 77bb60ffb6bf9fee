//! Product API client over HTTP.
//!
//! Talks to the catalog endpoints served under the store's base path:
//!
//! ```text
//! GET {base}/api/products        - [ProductSummary]
//! GET {base}/api/products/{id}   - Product, 404 if unknown
//! ```

use std::sync::Arc;

use example_store_core::{Product, ProductId, ProductSummary};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::{CatalogClient, CatalogError};

/// Client for the product API.
///
/// Cheaply cloneable; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    inner: Arc<HttpCatalogClientInner>,
}

#[derive(Debug)]
struct HttpCatalogClientInner {
    client: reqwest::Client,
    products_url: Url,
}

impl HttpCatalogClient {
    /// Create a client for the store rooted at `base_url`
    /// (e.g. `http://localhost:3000/hw/store`).
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid absolute URL.
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client that reuses an existing `reqwest` client.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid absolute URL.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, CatalogError> {
        let mut base = Url::parse(base_url)?;
        // Url::join replaces the last segment unless the path ends in '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let products_url = base.join("api/products/")?;

        Ok(Self {
            inner: Arc::new(HttpCatalogClientInner {
                client,
                products_url,
            }),
        })
    }

    /// URL of the product list endpoint.
    #[must_use]
    pub fn products_url(&self) -> Url {
        let mut url = self.inner.products_url.clone();
        let path = url.path().trim_end_matches('/').to_string();
        url.set_path(&path);
        url
    }

    /// URL of a product detail endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be built.
    pub fn product_url(&self, id: ProductId) -> Result<Url, CatalogError> {
        Ok(self.inner.products_url.join(&id.to_string())?)
    }

    /// Fetch `url` and decode its JSON body.
    ///
    /// Returns `Ok(None)` on 404 so callers can decide what "missing" means.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, CatalogError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status(status.as_u16()));
        }

        serde_json::from_str(&body).map(Some).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Decode(e)
        })
    }
}

impl CatalogClient for HttpCatalogClient {
    #[instrument(skip(self))]
    async fn fetch_product_summaries(&self) -> Result<Vec<ProductSummary>, CatalogError> {
        self.get_json(self.products_url())
            .await?
            .ok_or(CatalogError::Status(reqwest::StatusCode::NOT_FOUND.as_u16()))
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn fetch_product_by_id(&self, id: ProductId) -> Result<Product, CatalogError> {
        let url = self.product_url(id)?;
        self.get_json(url).await?.ok_or(CatalogError::NotFound(id))
    }
}
