//! Cart commands.

use example_store_core::ProductId;

use super::{CommandError, Store, settled};

/// Fetch a product and add one unit of it to the cart.
///
/// # Errors
///
/// Returns an error if the product does not exist or cannot be fetched.
#[allow(clippy::print_stdout)]
pub async fn add(store: &Store, id: ProductId) -> Result<(), CommandError> {
    store.load_product(id).await;
    let page = settled(store.product_page())?;

    store.add_product(&page.product);
    if store.cart_persistence_degraded() {
        tracing::warn!("Cart could not be saved; the change is lost on exit");
    }

    let count = store.cart_state().get(id).map_or(0, |line| line.count);
    println!("Added {} (x{count})", page.product.name);
    println!("{}", store.cart_label());
    Ok(())
}

/// Empty the cart.
#[allow(clippy::print_stdout)]
pub fn clear(store: &Store) {
    store.clear_cart();
    println!("{}", store.cart_label());
}

/// Print the cart table and grand total.
#[allow(clippy::print_stdout)]
pub fn show(store: &Store) {
    let page = store.cart_page();

    println!("{}", page.label);
    if let Some(link) = page.catalog_link {
        println!("Your cart is empty. Browse the catalog: {link}");
        return;
    }

    for row in &page.rows {
        println!(
            "{:>4}  {:<24} {:>10} x {:<4} {:>10}",
            row.id,
            row.name,
            row.price.display(),
            row.count,
            row.total.display()
        );
    }
    println!("Total: {}", page.total.display());
}
