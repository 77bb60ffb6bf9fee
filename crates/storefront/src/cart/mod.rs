//! Persistent shopping cart.
//!
//! [`CartStore`] is the only writer of [`CartState`]. Every mutation is
//! mirrored synchronously to a [`DurableStorage`](crate::storage::DurableStorage)
//! backend under [`CART_STORAGE_KEY`], and a store opened later over the same
//! storage recovers exactly the persisted contents.
//!
//! # Example
//!
//! ```rust
//! use example_store_core::{Price, ProductId};
//! use example_store_storefront::cart::CartStore;
//! use example_store_storefront::storage::MemoryStorage;
//!
//! let storage = MemoryStorage::new();
//! let mut cart = CartStore::open(storage.clone());
//! cart.add_item(ProductId::new(1), "prod 1", Price::from(11));
//!
//! // A fresh store sees the persisted line
//! let reopened = CartStore::open(storage);
//! assert_eq!(reopened.state().unique_count(), 1);
//! ```

mod state;
mod store;

pub use state::{CartLine, CartState, cart_label};
pub use store::{CART_STORAGE_KEY, CartStore};
