//! Read models handed to the presentation layer.

use example_store_core::{Price, Product, ProductId, ProductSummary};

use crate::cart::{CartState, cart_label};

/// Store name shown in the header, linking to the home page.
pub const STORE_NAME: &str = "Example store";

pub const HOME_PATH: &str = "/";
pub const CATALOG_PATH: &str = "/catalog";
pub const DELIVERY_PATH: &str = "/delivery";
pub const CONTACTS_PATH: &str = "/contacts";
pub const CART_PATH: &str = "/cart";

/// Path of a product's detail page.
#[must_use]
pub fn product_path(id: ProductId) -> String {
    format!("{CATALOG_PATH}/{id}")
}

/// One product in the catalog listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItemView {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Link to the detail page.
    pub href: String,
    /// Whether the product is already in the cart.
    pub in_cart: bool,
}

impl CatalogItemView {
    pub(crate) fn new(summary: ProductSummary, cart: &CartState) -> Self {
        Self {
            in_cart: cart.contains(summary.id),
            href: product_path(summary.id),
            id: summary.id,
            name: summary.name,
            price: summary.price,
        }
    }
}

/// The product detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPageView {
    pub product: Product,
    pub in_cart: bool,
    /// Units in the cart (0 when absent).
    pub count: u32,
}

impl ProductPageView {
    pub(crate) fn new(product: Product, cart: &CartState) -> Self {
        let count = cart.get(product.id).map_or(0, |line| line.count);
        Self {
            product,
            in_cart: count > 0,
            count,
        }
    }
}

/// One row of the cart table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRowView {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub count: u32,
    /// `count × price`.
    pub total: Price,
}

/// The cart page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPageView {
    pub rows: Vec<CartRowView>,
    /// Sum of row totals.
    pub total: Price,
    /// Header label, "Cart" or "Cart (N)".
    pub label: String,
    /// Link back to the catalog, offered when the cart is empty.
    pub catalog_link: Option<&'static str>,
}

impl From<&CartState> for CartPageView {
    fn from(cart: &CartState) -> Self {
        Self {
            rows: cart
                .lines()
                .map(|line| CartRowView {
                    id: line.product_id,
                    name: line.name.clone(),
                    price: line.price,
                    count: line.count,
                    total: line.total(),
                })
                .collect(),
            total: cart.grand_total(),
            label: cart_label(cart.unique_count()),
            catalog_link: cart.is_empty().then_some(CATALOG_PATH),
        }
    }
}

/// A header navigation link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: String,
}

/// Header links: home, catalog, delivery, contacts, cart.
#[must_use]
pub fn navigation(cart: &CartState) -> Vec<NavLink> {
    vec![
        NavLink {
            href: HOME_PATH,
            label: STORE_NAME.to_string(),
        },
        NavLink {
            href: CATALOG_PATH,
            label: "Catalog".to_string(),
        },
        NavLink {
            href: DELIVERY_PATH,
            label: "Delivery".to_string(),
        },
        NavLink {
            href: CONTACTS_PATH,
            label: "Contacts".to_string(),
        },
        NavLink {
            href: CART_PATH,
            label: cart_label(cart.unique_count()),
        },
    ]
}
