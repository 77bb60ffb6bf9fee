//! Application state container.
//!
//! Composes catalog fetches with the cart into the read models the
//! presentation layer renders. The container owns no durable state of its
//! own: catalog data comes from a [`CatalogClient`] and cart data from a
//! [`CartStore`] over the injected storage.
//!
//! All methods take `&self`. Catalog fetches may be in flight while the cart
//! is mutated; the two are independent and neither lock is held across an
//! `.await`.
//!
//! # Example
//!
//! ```rust
//! # async fn demo() {
//! use example_store_core::ProductId;
//! use example_store_storefront::app::StateContainer;
//! use example_store_storefront::catalog::{StaticCatalog, demo_products};
//! use example_store_storefront::storage::MemoryStorage;
//!
//! let app = StateContainer::new(StaticCatalog::new(demo_products(5)), MemoryStorage::new());
//!
//! app.load_product(ProductId::new(2)).await;
//! if let Some(page) = app.product_page().value() {
//!     app.add_product(&page.product);
//! }
//! assert_eq!(app.cart_label(), "Cart (1)");
//! # }
//! ```

mod loadable;
mod views;

pub use loadable::Loadable;
pub use views::{
    CART_PATH, CATALOG_PATH, CONTACTS_PATH, CartPageView, CartRowView, CatalogItemView,
    DELIVERY_PATH, HOME_PATH, NavLink, ProductPageView, STORE_NAME, product_path,
};

use std::sync::Arc;

use example_store_core::{Price, Product, ProductId, ProductSummary};
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use crate::cart::{CartState, CartStore, cart_label};
use crate::catalog::CatalogClient;
use crate::storage::DurableStorage;
use loadable::Slot;

/// State behind every storefront view.
pub struct StateContainer<C, S> {
    catalog: C,
    storage: S,
    cart: Mutex<CartStore<S>>,
    cart_events: watch::Sender<CartState>,
    products: Mutex<Slot<Vec<ProductSummary>>>,
    product: Mutex<Slot<Product>>,
}

impl<C, S> StateContainer<C, S>
where
    C: CatalogClient,
    S: DurableStorage + Clone,
{
    /// Create a container, opening the cart from `storage`.
    pub fn new(catalog: C, storage: S) -> Self {
        let cart = CartStore::open(storage.clone());
        let (cart_events, _) = watch::channel(cart.snapshot());

        Self {
            catalog,
            storage,
            cart: Mutex::new(cart),
            cart_events,
            products: Mutex::new(Slot::default()),
            product: Mutex::new(Slot::default()),
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetch the product list. Progress is visible through [`catalog`].
    ///
    /// [`catalog`]: StateContainer::catalog
    #[instrument(skip(self))]
    pub async fn load_catalog(&self) {
        let request = self.products.lock().begin();

        let state = match self.catalog.fetch_product_summaries().await {
            Ok(products) => {
                debug!(count = products.len(), "Catalog loaded");
                Loadable::Loaded(products)
            }
            Err(e) => {
                warn!(error = %e, "Failed to load catalog");
                Loadable::Failed(Arc::new(e))
            }
        };

        if !self.products.lock().settle(request, state) {
            debug!(request, "Discarded superseded catalog response");
        }
    }

    /// Fetch one product for the detail page. Progress is visible through
    /// [`product_page`]. A load superseded by a later call is discarded.
    ///
    /// [`product_page`]: StateContainer::product_page
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn load_product(&self, id: ProductId) {
        let request = self.product.lock().begin();

        let state = match self.catalog.fetch_product_by_id(id).await {
            Ok(product) => Loadable::Loaded(product),
            Err(e) => {
                warn!(error = %e, "Failed to load product");
                Loadable::Failed(Arc::new(e))
            }
        };

        if !self.product.lock().settle(request, state) {
            debug!(request, "Discarded superseded product response");
        }
    }

    /// Catalog listing with per-product cart flags.
    #[must_use]
    pub fn catalog(&self) -> Loadable<Vec<CatalogItemView>> {
        let products = self.products.lock().state.clone();
        let cart = self.cart_state();
        products.map(|list| {
            list.into_iter()
                .map(|summary| CatalogItemView::new(summary, &cart))
                .collect()
        })
    }

    /// The product detail page for the most recently requested product.
    #[must_use]
    pub fn product_page(&self) -> Loadable<ProductPageView> {
        let product = self.product.lock().state.clone();
        let cart = self.cart_state();
        product.map(|product| ProductPageView::new(product, &cart))
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Current cart contents.
    #[must_use]
    pub fn cart_state(&self) -> CartState {
        self.cart.lock().snapshot()
    }

    /// Add one unit of a product to the cart.
    pub fn add_to_cart(&self, id: ProductId, name: &str, price: Price) {
        let snapshot = {
            let mut cart = self.cart.lock();
            cart.add_item(id, name, price);
            cart.snapshot()
        };
        self.publish(snapshot);
    }

    /// Add one unit of `product` to the cart.
    pub fn add_product(&self, product: &Product) {
        self.add_to_cart(product.id, &product.name, product.price);
    }

    /// Empty the cart.
    pub fn clear_cart(&self) {
        let snapshot = {
            let mut cart = self.cart.lock();
            cart.clear();
            cart.snapshot()
        };
        self.publish(snapshot);
    }

    /// Re-open the cart from storage, discarding in-memory state.
    ///
    /// This is what a page reload does: whatever storage holds becomes the
    /// cart, including changes written by other stores.
    pub fn reload_cart(&self) {
        let fresh = CartStore::open(self.storage.clone());
        let snapshot = fresh.snapshot();
        *self.cart.lock() = fresh;
        debug!(lines = snapshot.unique_count(), "Cart reloaded");
        self.publish(snapshot);
    }

    /// Whether the most recent cart write failed to reach storage.
    #[must_use]
    pub fn cart_persistence_degraded(&self) -> bool {
        self.cart.lock().persistence_degraded()
    }

    /// Receive the cart contents after every change.
    #[must_use]
    pub fn subscribe_cart(&self) -> watch::Receiver<CartState> {
        self.cart_events.subscribe()
    }

    /// Cart page rows, total, and empty-cart link.
    #[must_use]
    pub fn cart_page(&self) -> CartPageView {
        CartPageView::from(&self.cart_state())
    }

    /// Header label for the cart link.
    #[must_use]
    pub fn cart_label(&self) -> String {
        cart_label(self.cart.lock().state().unique_count())
    }

    /// Header navigation links.
    #[must_use]
    pub fn navigation(&self) -> Vec<NavLink> {
        views::navigation(&self.cart_state())
    }

    fn publish(&self, snapshot: CartState) {
        self.cart_events.send_replace(snapshot);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::Semaphore;

    use super::*;
    use crate::cart::CART_STORAGE_KEY;
    use crate::catalog::{CatalogError, StaticCatalog, demo_products};
    use crate::storage::MemoryStorage;

    /// Catalog whose fetches wait for a permit, so tests can observe them in flight.
    struct GatedCatalog {
        inner: StaticCatalog,
        gate: Arc<Semaphore>,
    }

    impl CatalogClient for GatedCatalog {
        async fn fetch_product_summaries(&self) -> Result<Vec<ProductSummary>, CatalogError> {
            let _permit = self.gate.acquire().await;
            self.inner.fetch_product_summaries().await
        }

        async fn fetch_product_by_id(&self, id: ProductId) -> Result<Product, CatalogError> {
            let _permit = self.gate.acquire().await;
            self.inner.fetch_product_by_id(id).await
        }
    }

    /// Catalog that always fails like an unreachable server.
    struct DownCatalog;

    impl CatalogClient for DownCatalog {
        async fn fetch_product_summaries(&self) -> Result<Vec<ProductSummary>, CatalogError> {
            Err(CatalogError::Status(503))
        }

        async fn fetch_product_by_id(&self, _id: ProductId) -> Result<Product, CatalogError> {
            Err(CatalogError::Status(503))
        }
    }

    fn app_with(storage: MemoryStorage) -> StateContainer<StaticCatalog, MemoryStorage> {
        StateContainer::new(StaticCatalog::new(demo_products(5)), storage)
    }

    fn seeded(json: &str) -> MemoryStorage {
        let storage = MemoryStorage::new();
        storage.set_item(CART_STORAGE_KEY, json).unwrap();
        storage
    }

    #[tokio::test]
    async fn test_catalog_lists_products_with_links() {
        let app = app_with(MemoryStorage::new());
        assert!(matches!(app.catalog(), Loadable::Idle));

        app.load_catalog().await;

        let items = app.catalog().value().cloned().unwrap();
        assert_eq!(items.len(), 5);
        for (i, item) in (1..).zip(&items) {
            assert_eq!(item.id, ProductId::new(i));
            assert_eq!(item.name, format!("prod {i}"));
            assert_eq!(item.href, format!("/catalog/{i}"));
            assert!(!item.in_cart);
        }
    }

    #[tokio::test]
    async fn test_in_cart_flag_on_catalog_and_product_page() {
        let app = app_with(seeded(r#"{"1":{"name":"name","price":12,"count":1}}"#));

        app.load_catalog().await;
        app.load_product(ProductId::new(1)).await;

        let items = app.catalog().value().cloned().unwrap();
        assert!(items.first().unwrap().in_cart);
        assert!(!items.get(1).unwrap().in_cart);

        let page = app.product_page().value().cloned().unwrap();
        assert!(page.in_cart);
        assert_eq!(page.count, 1);
    }

    #[tokio::test]
    async fn test_add_from_product_page_increments_count() {
        let app = app_with(seeded(r#"{"1":{"name":"name","price":12,"count":1}}"#));
        app.load_product(ProductId::new(1)).await;

        let product = app.product_page().value().unwrap().product.clone();
        app.add_product(&product);

        let line = app.cart_state().get(ProductId::new(1)).cloned().unwrap();
        assert_eq!(line.count, 2);
        // Snapshotted name survives even though the catalog calls it "prod 1"
        assert_eq!(line.name, "name");
        assert_eq!(app.product_page().value().unwrap().count, 2);
    }

    #[tokio::test]
    async fn test_missing_product_fails_with_not_found() {
        let app = app_with(MemoryStorage::new());
        app.load_product(ProductId::new(99)).await;

        let page = app.product_page();
        assert!(page.error().is_some_and(CatalogError::is_not_found));
        assert!(app.cart_state().is_empty());
    }

    #[tokio::test]
    async fn test_failed_catalog_is_not_loading() {
        let app = StateContainer::new(DownCatalog, MemoryStorage::new());
        app.load_catalog().await;

        let catalog = app.catalog();
        assert!(!catalog.is_loading());
        assert!(matches!(catalog.error(), Some(CatalogError::Status(503))));
    }

    #[tokio::test]
    async fn test_cart_mutation_during_catalog_fetch() {
        let gate = Arc::new(Semaphore::new(0));
        let app = StateContainer::new(
            GatedCatalog {
                inner: StaticCatalog::new(demo_products(3)),
                gate: Arc::clone(&gate),
            },
            MemoryStorage::new(),
        );

        tokio::join!(app.load_catalog(), async {
            tokio::task::yield_now().await;
            assert!(app.catalog().is_loading());

            app.add_to_cart(ProductId::new(2), "prod 2", Price::from(12));
            gate.add_permits(1);
        });

        let items = app.catalog().value().cloned().unwrap();
        assert!(items.get(1).unwrap().in_cart);
        assert_eq!(app.cart_state().unique_count(), 1);
    }

    #[tokio::test]
    async fn test_superseded_product_load_is_discarded() {
        let gate = Arc::new(Semaphore::new(0));
        let app = StateContainer::new(
            GatedCatalog {
                inner: StaticCatalog::new(demo_products(3)),
                gate: Arc::clone(&gate),
            },
            MemoryStorage::new(),
        );

        tokio::join!(app.load_product(ProductId::new(1)), async {
            tokio::task::yield_now().await;
            gate.add_permits(2);
            app.load_product(ProductId::new(3)).await;
        });

        let page = app.product_page().value().cloned().unwrap();
        assert_eq!(page.product.id, ProductId::new(3));
    }

    #[test]
    fn test_clear_cart_resets_label_and_storage() {
        let storage = seeded(
            r#"{"1":{"name":"prod 1","price":11,"count":1},"2":{"name":"prod 2","price":12,"count":1}}"#,
        );
        let app = app_with(storage.clone());
        assert_eq!(app.cart_label(), "Cart (2)");

        app.clear_cart();

        assert_eq!(app.cart_state().unique_count(), 0);
        assert_eq!(app.cart_label(), "Cart");
        assert_eq!(app.cart_page().catalog_link, Some(CATALOG_PATH));
        assert!(CartStore::open(storage).state().is_empty());
    }

    #[test]
    fn test_reload_recovers_persisted_cart() {
        let storage = seeded(r#"{"1":{"name":"name","price":12,"count":1}}"#);
        let app = app_with(storage);
        let before = app.cart_state();

        app.reload_cart();

        assert_eq!(app.cart_state(), before);
        assert_eq!(
            app.cart_state().to_json().unwrap(),
            r#"{"1":{"name":"name","price":12,"count":1}}"#
        );
    }

    #[test]
    fn test_reload_adopts_external_storage_changes() {
        let storage = MemoryStorage::new();
        let app = app_with(storage.clone());
        app.add_to_cart(ProductId::new(1), "a", Price::from(1));

        storage.clear().unwrap();
        assert_eq!(app.cart_state().unique_count(), 1);

        app.reload_cart();
        assert!(app.cart_state().is_empty());
    }

    #[test]
    fn test_subscribers_see_every_change() {
        let app = app_with(MemoryStorage::new());
        let mut events = app.subscribe_cart();
        assert!(!events.has_changed().unwrap());

        app.add_to_cart(ProductId::new(1), "a", Price::from(3));
        assert!(events.has_changed().unwrap());
        assert_eq!(events.borrow_and_update().grand_total(), Price::from(3));

        app.add_to_cart(ProductId::new(1), "a", Price::from(3));
        assert_eq!(events.borrow_and_update().grand_total(), Price::from(6));

        app.clear_cart();
        assert!(events.borrow_and_update().is_empty());
    }

    #[test]
    fn test_grand_total_tracks_mutations() {
        let app = app_with(MemoryStorage::new());
        app.add_to_cart(ProductId::new(1), "prod 1", Price::from(11));
        app.add_to_cart(ProductId::new(2), "prod 2", Price::from(12));
        app.add_to_cart(ProductId::new(2), "prod 2", Price::from(12));

        let page = app.cart_page();
        let expected: Price = page.rows.iter().map(|r| r.price.times(r.count)).sum();
        assert_eq!(page.total, expected);
        assert_eq!(page.total, Price::from(35));
        assert_eq!(app.cart_label(), "Cart (2)");
    }
}
