//! Product repository.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::instrument;

use tienda_core::{Fields, Product, ProductId};

use super::RepositoryError;
use super::store::CollectionStore;

/// Repository for the product collection.
pub struct ProductRepository {
    store: Arc<dyn CollectionStore<Product>>,
    write_lock: Mutex<()>,
}

impl ProductRepository {
    /// Create a new product repository over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn CollectionStore<Product>>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Get every product in stored order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be loaded.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.store.load_all().await?)
    }

    /// Get a product by its id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be loaded.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let products = self.store.load_all().await?;
        Ok(products.into_iter().find(|p| &p.id == id))
    }

    /// Add a product, assigning it a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be loaded or saved.
    /// Returns `RepositoryError::IdGeneration` if no unused id could be found.
    #[instrument(skip(self, draft))]
    pub async fn add(&self, draft: Fields) -> Result<Product, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut products = self.store.load_all().await?;

        let id = ProductId::generate(products.iter().map(|p| &p.id))?;
        let product = Product::from_draft(id, draft);
        products.push(product.clone());
        self.store.save_all(&products).await?;

        tracing::info!(product_id = %product.id, "Product added");
        Ok(product)
    }

    /// Shallow-merge `patch` into the product with `id`.
    ///
    /// Returns the merged product, or `None` without touching storage when
    /// no product has that id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be loaded or saved.
    #[instrument(skip(self, id, patch), fields(product_id = %id))]
    pub async fn update(
        &self,
        id: &ProductId,
        patch: Fields,
    ) -> Result<Option<Product>, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut products = self.store.load_all().await?;

        let Some(product) = products.iter_mut().find(|p| &p.id == id) else {
            return Ok(None);
        };
        product.merge(patch);
        let updated = product.clone();
        self.store.save_all(&products).await?;

        Ok(Some(updated))
    }

    /// Remove every product with `id`.
    ///
    /// The collection is saved even when nothing matched. Returns the number
    /// of products removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be loaded or saved.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn delete(&self, id: &ProductId) -> Result<usize, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut products = self.store.load_all().await?;

        let before = products.len();
        products.retain(|p| &p.id != id);
        self.store.save_all(&products).await?;

        Ok(before - products.len())
    }
}
