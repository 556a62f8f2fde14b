//! Integration tests for Tienda.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tienda-integration-tests
//! ```
//!
//! Each test gets its own server bound to an ephemeral port on localhost,
//! backed by collection files in a fresh temporary directory. No external
//! services are needed.

use std::net::SocketAddr;
use std::path::PathBuf;

use reqwest::Client;
use tempfile::TempDir;

use tienda_core::{Cart, Product};
use tienda_server::config::ServerConfig;
use tienda_server::db::{CollectionStore, JsonFileStore};
use tienda_server::state::AppState;

/// A running server plus the files behind it.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub config: ServerConfig,
    // Held so the data directory outlives the server
    _data_dir: TempDir,
}

impl TestContext {
    /// Start a server over empty collections.
    pub async fn new() -> Self {
        Self::with_collections("[]", "[]").await
    }

    /// Start a server whose collection files start with the given contents.
    pub async fn with_collections(products_json: &str, carts_json: &str) -> Self {
        let data_dir = TempDir::new().expect("Failed to create data directory");
        let config = ServerConfig {
            data_dir: data_dir.path().to_path_buf(),
            ..ServerConfig::default()
        };
        std::fs::write(config.products_path(), products_json)
            .expect("Failed to seed product collection");
        std::fs::write(config.carts_path(), carts_json).expect("Failed to seed cart collection");

        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let app = tienda_server::app(AppState::new(config.clone()));
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server failed");
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{addr}"),
            config,
            _data_dir: data_dir,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Path of the product collection file.
    #[must_use]
    pub fn products_path(&self) -> PathBuf {
        self.config.products_path()
    }

    /// Path of the cart collection file.
    #[must_use]
    pub fn carts_path(&self) -> PathBuf {
        self.config.carts_path()
    }

    /// Products as currently stored on disk.
    pub async fn stored_products(&self) -> Vec<Product> {
        JsonFileStore::<Product>::new(self.products_path())
            .load_all()
            .await
            .expect("Product collection unreadable")
    }

    /// Carts as currently stored on disk.
    pub async fn stored_carts(&self) -> Vec<Cart> {
        JsonFileStore::<Cart>::new(self.carts_path())
            .load_all()
            .await
            .expect("Cart collection unreadable")
    }
}
