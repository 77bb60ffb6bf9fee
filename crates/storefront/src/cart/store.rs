//! Cart store backed by durable storage.

use example_store_core::{Price, ProductId};
use tracing::{debug, warn};

use super::CartState;
use crate::storage::DurableStorage;

/// Storage key shared by every cart store.
pub const CART_STORAGE_KEY: &str = "example-store-cart";

/// Owns the cart contents and keeps the durable copy in sync.
///
/// Storage failures never reach the caller: a corrupt or unreadable entry
/// opens as an empty cart, and a failed write leaves the in-memory state
/// updated with the failure reported through [`persistence_degraded`].
///
/// [`persistence_degraded`]: CartStore::persistence_degraded
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    state: CartState,
    degraded: bool,
}

impl<S: DurableStorage> CartStore<S> {
    /// Open the cart, hydrating it from `storage`.
    ///
    /// The persisted entry is the only input: a missing, unreadable, or
    /// malformed entry yields an empty cart.
    pub fn open(storage: S) -> Self {
        let state = hydrate(&storage);
        debug!(lines = state.unique_count(), "Cart hydrated");
        Self {
            storage,
            state,
            degraded: false,
        }
    }

    /// Current cart contents.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Owned copy of the current cart contents.
    #[must_use]
    pub fn snapshot(&self) -> CartState {
        self.state.clone()
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart has its count incremented; its stored
    /// name and price are left as they were. Ids that are not positive are
    /// ignored, since such a line could never be read back from storage.
    pub fn add_item(&mut self, product_id: ProductId, name: &str, price: Price) {
        if !product_id.is_valid() {
            warn!(%product_id, "Ignoring cart add for invalid product id");
            return;
        }
        let count = self.state.add(product_id, name, price);
        debug!(%product_id, count, "Added item to cart");
        self.persist();
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.state.clear();
        debug!("Cleared cart");
        self.persist();
    }

    /// Whether the most recent write to storage failed.
    ///
    /// While degraded the cart keeps working in memory only; the next
    /// successful write clears the flag.
    #[must_use]
    pub const fn persistence_degraded(&self) -> bool {
        self.degraded
    }

    fn persist(&mut self) {
        let result = if self.state.is_empty() {
            self.storage.remove_item(CART_STORAGE_KEY)
        } else {
            match self.state.to_json() {
                Ok(json) => self.storage.set_item(CART_STORAGE_KEY, &json),
                Err(e) => {
                    warn!(error = %e, "Failed to serialize cart");
                    self.degraded = true;
                    return;
                }
            }
        };

        match result {
            Ok(()) => self.degraded = false,
            Err(e) => {
                warn!(error = %e, "Failed to persist cart, continuing in memory");
                self.degraded = true;
            }
        }
    }
}

fn hydrate<S: DurableStorage>(storage: &S) -> CartState {
    let raw = match storage.get_item(CART_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return CartState::new(),
        Err(e) => {
            warn!(error = %e, "Failed to read stored cart, starting empty");
            return CartState::new();
        }
    };

    CartState::from_json(&raw).unwrap_or_else(|e| {
        warn!(error = %e, "Stored cart is corrupt, starting empty");
        CartState::new()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, StorageError};

    /// Storage whose writes always fail, like a full or disabled local store.
    struct ReadOnlyStorage(MemoryStorage);

    impl DurableStorage for ReadOnlyStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get_item(key)
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }

        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("storage disabled".to_string()))
        }

        fn clear(&self) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("storage disabled".to_string()))
        }
    }

    /// Storage that cannot even be read.
    struct BrokenStorage;

    impl DurableStorage for BrokenStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }

        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }

        fn clear(&self) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }
    }

    fn seeded(json: &str) -> MemoryStorage {
        let storage = MemoryStorage::new();
        storage.set_item(CART_STORAGE_KEY, json).unwrap();
        storage
    }

    #[test]
    fn test_open_empty_storage() {
        let cart = CartStore::open(MemoryStorage::new());
        assert!(cart.state().is_empty());
    }

    #[test]
    fn test_add_to_seeded_line_increments_count() {
        let storage = seeded(r#"{"1":{"name":"name","price":12,"count":1}}"#);
        let mut cart = CartStore::open(storage);

        cart.add_item(ProductId::new(1), "name", Price::from(12));

        assert_eq!(cart.state().get(ProductId::new(1)).unwrap().count, 2);
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::open(storage.clone());

        cart.add_item(ProductId::new(4), "prod 4", Price::from(14));
        let stored = storage.get_item(CART_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(stored, r#"{"4":{"name":"prod 4","price":14,"count":1}}"#);

        cart.clear();
        assert_eq!(storage.get_item(CART_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_clear_is_observed_by_fresh_store() {
        let storage = seeded(
            r#"{"1":{"name":"prod 1","price":11,"count":1},"2":{"name":"prod 2","price":12,"count":1}}"#,
        );
        let mut cart = CartStore::open(storage.clone());
        cart.clear();

        assert_eq!(cart.state().unique_count(), 0);
        assert!(CartStore::open(storage).state().is_empty());
    }

    #[test]
    fn test_hydration_is_idempotent() {
        let storage = seeded(r#"{"3":{"name":"c","price":2.5,"count":4}}"#);
        let first = CartStore::open(storage.clone());
        let second = CartStore::open(storage);
        assert_eq!(first.snapshot(), second.snapshot());
    }

    #[test]
    fn test_stores_do_not_push_to_each_other() {
        let storage = MemoryStorage::new();
        let mut writer = CartStore::open(storage.clone());
        let reader = CartStore::open(storage.clone());

        writer.add_item(ProductId::new(1), "a", Price::from(1));

        assert!(reader.state().is_empty());
        assert_eq!(CartStore::open(storage).state().unique_count(), 1);
    }

    #[test]
    fn test_accepted_lines_survive_reopen() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::open(storage.clone());

        cart.add_item(ProductId::new(1), "good", Price::from(5));
        cart.add_item(ProductId::new(0), "zero", Price::from(5));
        cart.add_item(ProductId::new(-4), "negative", Price::from(5));
        cart.add_item(ProductId::new(1), "good", Price::from(5));

        assert_eq!(cart.state().unique_count(), 1);
        assert!(!cart.persistence_degraded());

        let reopened = CartStore::open(storage);
        assert_eq!(reopened.snapshot(), cart.snapshot());
        assert_eq!(reopened.state().get(ProductId::new(1)).unwrap().count, 2);
    }

    #[test]
    fn test_corrupt_entry_opens_empty() {
        for raw in ["{not json", "[1,2]", r#"{"1":{"name":"x","price":1,"count":0}}"#] {
            let cart = CartStore::open(seeded(raw));
            assert!(cart.state().is_empty(), "expected empty cart for {raw}");
        }
    }

    #[test]
    fn test_huge_stored_price_totals_without_panicking() {
        let storage = seeded(r#"{"1":{"name":"x","price":7e28,"count":2},"2":{"name":"y","price":1,"count":1}}"#);
        let cart = CartStore::open(storage);

        assert_eq!(cart.state().unique_count(), 2);
        let line = cart.state().get(ProductId::new(1)).unwrap();
        assert_eq!(line.total(), Price::MAX);
        assert_eq!(cart.state().grand_total(), Price::MAX);
    }

    #[test]
    fn test_unreadable_storage_opens_empty() {
        let mut cart = CartStore::open(BrokenStorage);
        assert!(cart.state().is_empty());

        cart.add_item(ProductId::new(1), "a", Price::from(1));
        assert_eq!(cart.state().unique_count(), 1);
    }

    #[test]
    fn test_write_failure_degrades_to_memory() {
        let inner = seeded(r#"{"1":{"name":"a","price":1,"count":1}}"#);
        let mut cart = CartStore::open(ReadOnlyStorage(inner.clone()));
        assert!(!cart.persistence_degraded());

        cart.add_item(ProductId::new(1), "a", Price::from(1));

        assert_eq!(cart.state().get(ProductId::new(1)).unwrap().count, 2);
        assert!(cart.persistence_degraded());
        // Durable copy still holds the last acknowledged write
        assert_eq!(
            CartStore::open(inner).state().get(ProductId::new(1)).unwrap().count,
            1
        );
    }

    #[test]
    fn test_successful_write_clears_degraded_flag() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::open(storage);
        cart.degraded = true;

        cart.add_item(ProductId::new(1), "a", Price::from(1));
        assert!(!cart.persistence_degraded());
    }
}
