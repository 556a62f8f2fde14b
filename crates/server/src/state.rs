//! Application state shared across handlers.

use std::sync::Arc;

use tienda_core::{Cart, Product};

use crate::config::ServerConfig;
use crate::db::{CartRepository, CollectionStore, JsonFileStore, ProductRepository};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Each repository owns the
/// write lock for its collection, so there must be exactly one state per
/// set of collection files.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    products: ProductRepository,
    carts: CartRepository,
}

impl AppState {
    /// Create state backed by the JSON files named in `config`.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let products = Arc::new(JsonFileStore::<Product>::new(config.products_path()));
        let carts = Arc::new(JsonFileStore::<Cart>::new(config.carts_path()));
        Self::with_stores(config, products, carts)
    }

    /// Create state over arbitrary stores (e.g. in-memory stores in tests).
    #[must_use]
    pub fn with_stores(
        config: ServerConfig,
        products: Arc<dyn CollectionStore<Product>>,
        carts: Arc<dyn CollectionStore<Cart>>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                products: ProductRepository::new(products),
                carts: CartRepository::new(carts),
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get the product repository.
    #[must_use]
    pub fn products(&self) -> &ProductRepository {
        &self.inner.products
    }

    /// Get the cart repository.
    #[must_use]
    pub fn carts(&self) -> &CartRepository {
        &self.inner.carts
    }
}
