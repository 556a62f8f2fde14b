//! `tienda init`: prepare the collection files.

use tienda_core::{Cart, Product};
use tienda_server::config::ServerConfig;
use tienda_server::db::{CollectionStore, JsonFileStore};

use super::CliError;

/// Create missing collection files, or reset both when `force` is set.
///
/// # Errors
///
/// Returns `CliError::Store` if a file cannot be written.
pub async fn run(config: &ServerConfig, force: bool) -> Result<(), CliError> {
    let products = JsonFileStore::<Product>::new(config.products_path());
    let carts = JsonFileStore::<Cart>::new(config.carts_path());

    if force {
        products.save_all(&[]).await?;
        carts.save_all(&[]).await?;
        tracing::warn!(
            products = %products.path().display(),
            carts = %carts.path().display(),
            "Collections reset to empty"
        );
        return Ok(());
    }

    for (created, path) in [
        (products.ensure_exists().await?, products.path()),
        (carts.ensure_exists().await?, carts.path()),
    ] {
        if !created {
            tracing::info!(path = %path.display(), "Collection file already present, left as is");
        }
    }
    Ok(())
}
