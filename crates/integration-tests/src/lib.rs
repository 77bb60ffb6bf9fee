//! Integration tests for the Example Store.
//!
//! Each test boots the catalog API in-process on an ephemeral port and drives
//! a [`StateContainer`](example_store_storefront::app::StateContainer)
//! against it over real HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p example-store-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use example_store_core::Product;
use example_store_storefront::catalog::{
    CatalogError, HttpCatalogClient, StaticCatalog, demo_products,
};
use example_store_storefront::config::StorefrontConfig;
use example_store_storefront::routes;
use example_store_storefront::state::AppState;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A catalog server running on a background task.
///
/// The server stops when this is dropped.
pub struct TestServer {
    addr: SocketAddr,
    base_path: String,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Serve the five-product demo catalog under the default base path.
    ///
    /// # Errors
    ///
    /// Returns an error if no local port can be bound.
    pub async fn demo() -> std::io::Result<Self> {
        Self::spawn(demo_products(5)).await
    }

    /// Serve `products` under the default base path.
    ///
    /// # Errors
    ///
    /// Returns an error if no local port can be bound.
    pub async fn spawn(products: Vec<Product>) -> std::io::Result<Self> {
        let config = StorefrontConfig::default();
        let base_path = config.base_path.clone();
        let state = AppState::with_catalog(config, StaticCatalog::new(products));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = routes::app(state);

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Test server stopped");
            }
        });

        Ok(Self {
            addr,
            base_path,
            handle,
        })
    }

    /// Root URL of the server, e.g. `http://127.0.0.1:PORT`.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// URL the store is mounted at, e.g. `http://127.0.0.1:PORT/hw/store`.
    #[must_use]
    pub fn store_url(&self) -> String {
        format!("{}{}", self.url(), self.base_path)
    }

    /// A catalog client pointed at this server.
    ///
    /// # Errors
    ///
    /// Returns an error if the store URL cannot be parsed.
    pub fn client(&self) -> Result<HttpCatalogClient, CatalogError> {
        HttpCatalogClient::new(&self.store_url())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
