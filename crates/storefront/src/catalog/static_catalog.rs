//! In-memory catalog.

use std::path::Path;
use std::sync::Arc;

use example_store_core::{Price, Product, ProductId, ProductSummary};

use super::{CatalogClient, CatalogError};

/// A fixed product list. Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Arc<Vec<Product>>,
}

impl StaticCatalog {
    /// Create a catalog from a product list.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(products),
        }
    }

    /// Load a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let products: Vec<Product> = serde_json::from_str(&content)?;
        Ok(Self::new(products))
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Summaries of all products.
    #[must_use]
    pub fn summaries(&self) -> Vec<ProductSummary> {
        self.products.iter().map(Product::summary).collect()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

impl CatalogClient for StaticCatalog {
    async fn fetch_product_summaries(&self) -> Result<Vec<ProductSummary>, CatalogError> {
        Ok(self.summaries())
    }

    async fn fetch_product_by_id(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.get(id).cloned().ok_or(CatalogError::NotFound(id))
    }
}

/// A deterministic demo catalog of `n` products.
///
/// Product `i` (1-based) is named `prod i` and costs `10 + i`.
#[must_use]
pub fn demo_products(n: u16) -> Vec<Product> {
    (1..=n)
        .map(|i| Product {
            id: ProductId::new(i32::from(i)),
            name: format!("prod {i}"),
            price: Price::from(10 + u32::from(i)),
            description: "description".to_string(),
            color: "color".to_string(),
            material: "material".to_string(),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_products() {
        let products = demo_products(5);
        assert_eq!(products.len(), 5);

        let second = products.get(1).unwrap();
        assert_eq!(second.id, ProductId::new(2));
        assert_eq!(second.name, "prod 2");
        assert_eq!(second.price, Price::from(12));
    }

    #[tokio::test]
    async fn test_fetch_by_id() {
        let catalog = StaticCatalog::new(demo_products(3));

        let product = catalog.fetch_product_by_id(ProductId::new(3)).await.unwrap();
        assert_eq!(product.name, "prod 3");

        let err = catalog
            .fetch_product_by_id(ProductId::new(4))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(id) if id == ProductId::new(4)));
    }

    #[tokio::test]
    async fn test_fetch_summaries_keeps_order() {
        let catalog = StaticCatalog::new(demo_products(3));
        let names: Vec<String> = catalog
            .fetch_product_summaries()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["prod 1", "prod 2", "prod 3"]);
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, serde_json::to_string(&demo_products(2)).unwrap()).unwrap();

        let catalog = StaticCatalog::from_json_file(&path).unwrap();
        assert_eq!(catalog.products().len(), 2);

        let zero_id =
            r#"[{"id":0,"name":"zero","price":1,"description":"","color":"","material":""}]"#;
        std::fs::write(&path, zero_id).unwrap();
        assert!(matches!(
            StaticCatalog::from_json_file(&path),
            Err(CatalogError::Decode(_))
        ));

        std::fs::write(&path, "{").unwrap();
        assert!(matches!(
            StaticCatalog::from_json_file(&path),
            Err(CatalogError::Decode(_))
        ));
    }
}
