//! Product entity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::ProductId;

/// Caller-supplied JSON fields, stored as given.
pub type Fields = Map<String, Value>;

/// Key the id is stored under in every persisted entity.
pub const ID_FIELD: &str = "id";

/// A product in the catalogue.
///
/// Only the id is interpreted; name, price and anything else the caller sends
/// are kept verbatim in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Product {
    /// Build a product from a request body and a freshly assigned id.
    ///
    /// Any `id` in the body is discarded so the assigned one always wins.
    #[must_use]
    pub fn from_draft(id: ProductId, mut draft: Fields) -> Self {
        draft.remove(ID_FIELD);
        Self { id, fields: draft }
    }

    /// Shallow-merge `patch` over the stored fields.
    ///
    /// Keys in `patch` replace existing keys; all other fields are kept. The
    /// id is never reassigned.
    pub fn merge(&mut self, patch: Fields) {
        for (key, value) in patch {
            if key != ID_FIELD {
                self.fields.insert(key, value);
            }
        }
    }
}
