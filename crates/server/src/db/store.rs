//! Whole-collection stores.
//!
//! A store hands out the complete collection on every load and replaces the
//! complete collection on every save. There is no caching between calls.

use std::ffi::OsString;
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::instrument;

/// Errors raised while reading or writing a collection.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file is missing, unreadable, or could not be written.
    #[error("collection file {} unavailable: {source}", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not a valid JSON array of the expected entity.
    #[error("collection file {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory collection could not be encoded.
    #[error("failed to encode collection: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Storage for one collection of entities.
#[async_trait]
pub trait CollectionStore<T>: Send + Sync + 'static
where
    T: Send + Sync + 'static,
{
    /// Load every entity, in stored order.
    async fn load_all(&self) -> Result<Vec<T>, StoreError>;

    /// Replace the stored collection with `items`.
    async fn save_all(&self, items: &[T]) -> Result<(), StoreError>;
}

/// Collection persisted as a pretty-printed JSON array in a single file.
///
/// Saves go to a sibling `.tmp` file which is then renamed over the target,
/// so readers only ever see a complete array.
pub struct JsonFileStore<T> {
    path: PathBuf,
    tmp_path: PathBuf,
    _entity: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    /// Create a store backed by `path`. Nothing is touched on disk.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut tmp = OsString::from(path.as_os_str());
        tmp.push(".tmp");
        Self {
            path,
            tmp_path: PathBuf::from(tmp),
            _entity: PhantomData,
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the backing file as an empty array if it does not exist.
    ///
    /// Returns `true` when a file was created.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the directory or file cannot be
    /// created.
    pub async fn ensure_exists(&self) -> Result<bool, StoreError> {
        if fs::try_exists(&self.path)
            .await
            .map_err(|source| self.unavailable(source))?
        {
            return Ok(false);
        }
        self.write_raw("[]").await?;
        tracing::info!(path = %self.path.display(), "Created empty collection file");
        Ok(true)
    }

    async fn write_raw(&self, contents: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| self.unavailable(source))?;
        }
        fs::write(&self.tmp_path, contents)
            .await
            .map_err(|source| self.unavailable(source))?;
        fs::rename(&self.tmp_path, &self.path)
            .await
            .map_err(|source| self.unavailable(source))
    }

    fn unavailable(&self, source: std::io::Error) -> StoreError {
        StoreError::Unavailable {
            path: self.path.clone(),
            source,
        }
    }
}

impl<T> fmt::Debug for JsonFileStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<T> CollectionStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    #[instrument(skip(self))]
    async fn load_all(&self) -> Result<Vec<T>, StoreError> {
        let raw = fs::read_to_string(&self.path)
            .await
            .map_err(|source| self.unavailable(source))?;

        let items: Vec<T> = serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(path = %self.path.display(), count = items.len(), "Collection loaded");
        Ok(items)
    }

    #[instrument(skip(self, items))]
    async fn save_all(&self, items: &[T]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(items).map_err(StoreError::Encode)?;
        self.write_raw(&json).await?;

        tracing::debug!(path = %self.path.display(), count = items.len(), "Collection saved");
        Ok(())
    }
}

/// Collection held in memory. Used in tests and for throwaway servers.
#[derive(Debug)]
pub struct MemoryStore<T> {
    items: RwLock<Vec<T>>,
}

impl<T> MemoryStore<T> {
    /// Create a store seeded with `items`.
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl<T> CollectionStore<T> for MemoryStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn load_all(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.items.read().await.clone())
    }

    async fn save_all(&self, items: &[T]) -> Result<(), StoreError> {
        *self.items.write().await = items.to_vec();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tienda_core::{Product, ProductId};

    fn product(id: &str, name: &str) -> Product {
        Product::from_draft(
            ProductId::new(id),
            json!({"name": name, "price": 10})
                .as_object()
                .cloned()
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::<Product>::new(dir.path().join("productos.json"));
        let items = vec![product("a000000001", "Widget"), product("a000000002", "Gadget")];

        store.save_all(&items).await.unwrap();
        let loaded = store.load_all().await.unwrap();

        assert_eq!(loaded, items);
    }

    #[tokio::test]
    async fn test_saved_file_is_pretty_json_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("productos.json");
        let store = JsonFileStore::<Product>::new(&path);

        store.save_all(&[product("a000000001", "Widget")]).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\n  {"));
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, json!([{"id": "a000000001", "name": "Widget", "price": 10}]));
        assert!(!dir.path().join("productos.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::<Product>::new(dir.path().join("missing.json"));

        let err = store.load_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn test_malformed_file_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("productos.json");
        std::fs::write(&path, "[{\"id\": \"x\",").unwrap();
        let store = JsonFileStore::<Product>::new(&path);

        let err = store.load_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
        assert!(err.to_string().contains("productos.json"));
    }

    #[tokio::test]
    async fn test_object_instead_of_array_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("productos.json");
        std::fs::write(&path, "{}").unwrap();
        let store = JsonFileStore::<Product>::new(&path);

        assert!(matches!(
            store.load_all().await.unwrap_err(),
            StoreError::Corrupt { .. }
        ));
    }

    #[tokio::test]
    async fn test_record_without_id_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("productos.json");
        std::fs::write(&path, r#"[{"id": "a000000001", "name": "x"}, {"name": "legacy"}]"#)
            .unwrap();
        let store = JsonFileStore::<Product>::new(&path);

        let err = store.load_all().await.unwrap_err();

        assert!(matches!(err, StoreError::Corrupt { .. }));
        assert!(err.to_string().contains("missing field `id`"));
    }

    #[tokio::test]
    async fn test_ensure_exists_creates_once() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::<Product>::new(dir.path().join("data/productos.json"));

        assert!(store.ensure_exists().await.unwrap());
        assert!(store.load_all().await.unwrap().is_empty());

        store.save_all(&[product("a000000001", "Widget")]).await.unwrap();
        assert!(!store.ensure_exists().await.unwrap());
        assert_eq!(store.load_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_memory_store_replaces_contents() {
        let store = MemoryStore::new(vec![product("a000000001", "Widget")]);

        store.save_all(&[]).await.unwrap();

        assert!(store.load_all().await.unwrap().is_empty());
    }
}
