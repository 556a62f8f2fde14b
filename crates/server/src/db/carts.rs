//! Cart repository.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::instrument;

use tienda_core::{Cart, CartDraft, CartId, CartItem, ProductId};

use super::RepositoryError;
use super::store::CollectionStore;

/// Repository for the cart collection.
pub struct CartRepository {
    store: Arc<dyn CollectionStore<Cart>>,
    write_lock: Mutex<()>,
}

impl CartRepository {
    /// Create a new cart repository over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn CollectionStore<Cart>>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Get every cart in stored order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be loaded.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Cart>, RepositoryError> {
        Ok(self.store.load_all().await?)
    }

    /// Create a cart, assigning it a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be loaded or saved.
    /// Returns `RepositoryError::IdGeneration` if no unused id could be found.
    #[instrument(skip(self, draft))]
    pub async fn create(&self, draft: CartDraft) -> Result<Cart, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut carts = self.store.load_all().await?;

        let id = CartId::generate(carts.iter().map(|c| &c.id))?;
        let cart = Cart::from_draft(id, draft);
        carts.push(cart.clone());
        self.store.save_all(&carts).await?;

        tracing::info!(cart_id = %cart.id, "Cart created");
        Ok(cart)
    }

    /// Get the items of the cart with `id`.
    ///
    /// `None` means there is no such cart; an existing empty cart yields
    /// `Some(vec![])`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be loaded.
    #[instrument(skip(self, id), fields(cart_id = %id))]
    pub async fn get_items(&self, id: &CartId) -> Result<Option<Vec<CartItem>>, RepositoryError> {
        let carts = self.store.load_all().await?;
        Ok(carts.into_iter().find(|c| &c.id == id).map(|c| c.items))
    }

    /// Add `quantity` of `product` to the cart with `id`.
    ///
    /// An existing line for the product has its quantity incremented;
    /// otherwise a new line is appended. Returns the updated cart, or `None`
    /// without touching storage when no cart has that id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be loaded or saved.
    #[instrument(skip(self, id, product), fields(cart_id = %id, product_id = %product))]
    pub async fn add_item(
        &self,
        id: &CartId,
        product: ProductId,
        quantity: i64,
    ) -> Result<Option<Cart>, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut carts = self.store.load_all().await?;

        let Some(cart) = carts.iter_mut().find(|c| &c.id == id) else {
            return Ok(None);
        };
        cart.add_item(product, quantity);
        let updated = cart.clone();
        self.store.save_all(&carts).await?;

        Ok(Some(updated))
    }
}
