//! Catalog commands.

use example_store_core::ProductId;

use super::{CommandError, Store, settled};

/// Print every product, marking the ones already in the cart.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched.
#[allow(clippy::print_stdout)]
pub async fn list(store: &Store) -> Result<(), CommandError> {
    store.load_catalog().await;
    let items = settled(store.catalog())?;

    println!("{}", store.cart_label());
    for item in items {
        let marker = if item.in_cart { " [in cart]" } else { "" };
        println!(
            "{:>4}  {:<24} {:>10}  {}{marker}",
            item.id,
            item.name,
            item.price.display(),
            item.href
        );
    }
    Ok(())
}

/// Print one product's details.
///
/// # Errors
///
/// Returns an error if the product does not exist or cannot be fetched.
#[allow(clippy::print_stdout)]
pub async fn show(store: &Store, id: ProductId) -> Result<(), CommandError> {
    store.load_product(id).await;
    let page = settled(store.product_page())?;
    let product = &page.product;

    println!("{} ({})", product.name, product.id);
    println!("  Price:       {}", product.price.display());
    println!("  Description: {}", product.description);
    println!("  Color:       {}", product.color);
    println!("  Material:    {}", product.material);
    if page.in_cart {
        println!("  In cart:     {}", page.count);
    }
    Ok(())
}
