//! Catalog records as served by the product API.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// The subset of a product shown in catalog listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
}

/// Full product detail, shown on the product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub description: String,
    pub color: String,
    pub material: String,
}

impl Product {
    /// Listing view of this product.
    #[must_use]
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
        }
    }
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        product.summary()
    }
}
