//! `tienda check`: validate the collection files.

use std::collections::HashSet;

use tienda_core::{Cart, Product};
use tienda_server::config::ServerConfig;
use tienda_server::db::{CollectionStore, JsonFileStore};

use super::CliError;

/// Counts gathered from a successful check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckReport {
    pub products: usize,
    pub carts: usize,
    pub cart_items: usize,
}

/// Load both collections and verify id uniqueness and cart line uniqueness.
///
/// Cart lines pointing at products that no longer exist are only logged.
///
/// # Errors
///
/// Returns `CliError::Store` if a file is missing or corrupt, and
/// `CliError::DuplicateId` / `CliError::DuplicateCartLine` on broken invariants.
pub async fn run(config: &ServerConfig) -> Result<CheckReport, CliError> {
    let products = JsonFileStore::<Product>::new(config.products_path())
        .load_all()
        .await?;
    let carts = JsonFileStore::<Cart>::new(config.carts_path())
        .load_all()
        .await?;

    let mut product_ids = HashSet::new();
    for product in &products {
        if !product_ids.insert(product.id.as_str()) {
            return Err(CliError::DuplicateId {
                collection: "products",
                id: product.id.to_string(),
            });
        }
    }

    let mut cart_ids = HashSet::new();
    let mut cart_items = 0;
    for cart in &carts {
        if !cart_ids.insert(cart.id.as_str()) {
            return Err(CliError::DuplicateId {
                collection: "carts",
                id: cart.id.to_string(),
            });
        }

        let mut lines = HashSet::new();
        for item in &cart.items {
            if !lines.insert(item.product.as_str()) {
                return Err(CliError::DuplicateCartLine {
                    cart: cart.id.to_string(),
                    product: item.product.to_string(),
                });
            }
            if !product_ids.contains(item.product.as_str()) {
                tracing::warn!(
                    cart_id = %cart.id,
                    product_id = %item.product,
                    "Cart references unknown product"
                );
            }
        }
        cart_items += cart.items.len();
    }

    Ok(CheckReport {
        products: products.len(),
        carts: carts.len(),
        cart_items,
    })
}
