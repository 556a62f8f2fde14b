//! Persistence for the product and cart collections.
//!
//! # Layout
//!
//! Each collection is a single JSON array on disk inside the data directory:
//!
//! - `productos.json` - products
//! - `carrito.json` - carts, each with an embedded `products` item list
//!
//! Every repository operation is a full load → mutate → save cycle against
//! its [`CollectionStore`]. Mutating cycles on one collection are serialized
//! by the owning repository; reads never block.

pub mod carts;
pub mod products;
pub mod store;

use thiserror::Error;
use tienda_core::IdError;

pub use carts::CartRepository;
pub use products::ProductRepository;
pub use store::{CollectionStore, JsonFileStore, MemoryStore, StoreError};

/// Errors returned by the repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Loading or saving the collection failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// No fresh id could be assigned to a new entity.
    #[error("id generation failed: {0}")]
    IdGeneration(#[from] IdError),
}
