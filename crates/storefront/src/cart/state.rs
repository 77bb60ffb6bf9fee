//! Cart contents and the views derived from them.

use std::collections::BTreeMap;

use example_store_core::{Price, ProductId};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One product entry in the cart.
///
/// `name` and `price` are snapshotted when the product is first added and are
/// never refreshed from the catalog afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub count: u32,
}

impl CartLine {
    /// `count × price`.
    #[must_use]
    pub fn total(&self) -> Price {
        self.price.times(self.count)
    }
}

/// Cart contents keyed by product.
///
/// Invariants: every key equals its line's `product_id`, every id is
/// positive, and every line has `count >= 1`. Lines iterate in ascending id
/// order.
///
/// Serialized as a flat JSON object keyed by the id string:
/// `{"1":{"name":"prod 1","price":11,"count":2}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    lines: BTreeMap<ProductId, CartLine>,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the persisted form.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not an object of valid cart lines.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to the persisted form.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Line for `product_id`, if present.
    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.get(&product_id)
    }

    /// Whether `product_id` is in the cart.
    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.lines.contains_key(&product_id)
    }

    /// Lines in ascending product id order.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products (the header badge count).
    #[must_use]
    pub fn unique_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn grand_total(&self) -> Price {
        self.lines.values().map(CartLine::total).sum()
    }

    /// Add one unit of a product and return its new count.
    pub(crate) fn add(&mut self, product_id: ProductId, name: &str, price: Price) -> u32 {
        let line = self.lines.entry(product_id).or_insert_with(|| CartLine {
            product_id,
            name: name.to_owned(),
            price,
            count: 0,
        });
        line.count = line.count.saturating_add(1);
        line.count
    }

    pub(crate) fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Label for the cart link in the header: "Cart" or "Cart (N)".
#[must_use]
pub fn cart_label(unique_count: usize) -> String {
    if unique_count == 0 {
        "Cart".to_string()
    } else {
        format!("Cart ({unique_count})")
    }
}

// =============================================================================
// Persisted Form
// =============================================================================

#[derive(Serialize)]
struct StoredLineRef<'a> {
    name: &'a str,
    price: Price,
    count: u32,
}

#[derive(Deserialize)]
struct StoredLine {
    name: String,
    price: Price,
    count: u32,
}

impl Serialize for CartState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let stored: BTreeMap<ProductId, StoredLineRef<'_>> = self
            .lines
            .iter()
            .map(|(id, line)| {
                (
                    *id,
                    StoredLineRef {
                        name: &line.name,
                        price: line.price,
                        count: line.count,
                    },
                )
            })
            .collect();
        stored.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CartState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stored = BTreeMap::<ProductId, StoredLine>::deserialize(deserializer)?;
        let mut lines = BTreeMap::new();
        // Keys are positive: ProductId refuses anything else on the way in
        for (product_id, line) in stored {
            if line.count == 0 {
                return Err(D::Error::custom(format!(
                    "line for product {product_id} has zero count"
                )));
            }
            lines.insert(
                product_id,
                CartLine {
                    product_id,
                    name: line.name,
                    price: line.price,
                    count: line.count,
                },
            );
        }
        Ok(Self { lines })
    }
}
