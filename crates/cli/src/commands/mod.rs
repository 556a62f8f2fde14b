//! CLI command implementations.

pub mod check;
pub mod init;

use thiserror::Error;

use tienda_server::config::ConfigError;
use tienda_server::db::StoreError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{collection} has duplicate id {id}")]
    DuplicateId { collection: &'static str, id: String },

    #[error("cart {cart} lists product {product} more than once")]
    DuplicateCartLine { cart: String, product: String },
}
