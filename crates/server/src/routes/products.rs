//! Product route handlers.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use tienda_core::{Fields, Product, ProductId};

use super::{MessageResponse, parse_body};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Body of the 404 returned for an unknown product id.
pub const PRODUCT_NOT_FOUND: &str = "Producto no encontrado";

/// Message returned after a delete.
pub const PRODUCT_DELETED: &str = "Producto eliminado correctamente";

/// List every product.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.products().get_all().await?))
}

/// Show one product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(pid): Path<String>,
) -> Result<Json<Product>> {
    state
        .products()
        .get_by_id(&ProductId::new(pid))
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(PRODUCT_NOT_FOUND))
}

/// Add a product. The body's fields are stored as given.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Product>)> {
    let draft: Fields = parse_body(&body)?;
    let product = state.products().add(draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Merge the body into an existing product.
///
/// Responds with the submitted body rather than the stored product. An
/// unknown id is not an error; nothing is written.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    Path(pid): Path<String>,
    body: Bytes,
) -> Result<Json<Fields>> {
    let patch: Fields = parse_body(&body)?;
    let id = ProductId::new(pid);

    if state.products().update(&id, patch.clone()).await?.is_none() {
        tracing::warn!(product_id = %id, "Update for unknown product ignored");
    }

    Ok(Json(patch))
}

/// Delete a product. Succeeds whether or not the id existed.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(pid): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = ProductId::new(pid);
    let removed = state.products().delete(&id).await?;
    tracing::info!(product_id = %id, removed, "Product delete processed");

    Ok(Json(MessageResponse {
        message: PRODUCT_DELETED,
    }))
}
