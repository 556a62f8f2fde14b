//! Cart route handlers.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use tienda_core::{Cart, CartDraft, CartId, CartItem, ProductId};

use super::{MessageResponse, parse_body};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Body of the 404 returned for an unknown cart id.
pub const CART_NOT_FOUND: &str = "Carrito no encontrado";

/// Message returned after adding a product to a cart.
pub const PRODUCT_ADDED: &str = "Producto agregado al carrito correctamente";

/// Body of `POST /api/carts/{cid}/product/{pid}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AddProductRequest {
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

const fn default_quantity() -> i64 {
    1
}

impl Default for AddProductRequest {
    fn default() -> Self {
        Self {
            quantity: default_quantity(),
        }
    }
}

/// Create a cart from the (optional) body.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Cart>)> {
    let draft: CartDraft = parse_body(&body)?;
    let cart = state.carts().create(draft).await?;
    Ok((StatusCode::CREATED, Json(cart)))
}

/// List the items of a cart.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(cid): Path<String>,
) -> Result<Json<Vec<CartItem>>> {
    state
        .carts()
        .get_items(&CartId::new(cid))
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(CART_NOT_FOUND))
}

/// Add a quantity of a product to a cart.
///
/// An unknown cart is not an error; nothing is written.
#[instrument(skip(state, body))]
pub async fn add_product(
    State(state): State<AppState>,
    Path((cid, pid)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<MessageResponse>> {
    let request: AddProductRequest = parse_body(&body)?;
    let cart_id = CartId::new(cid);

    if state
        .carts()
        .add_item(&cart_id, ProductId::new(pid), request.quantity)
        .await?
        .is_none()
    {
        tracing::warn!(cart_id = %cart_id, "Add to unknown cart ignored");
    }

    Ok(Json(MessageResponse {
        message: PRODUCT_ADDED,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::CollectionStore;
    use crate::routes::test_support::{send, test_app};
    use axum::http::Method;
    use serde_json::json;

    fn empty_cart(id: &str) -> Cart {
        Cart::from_draft(CartId::new(id), CartDraft::default())
    }

    #[tokio::test]
    async fn test_create_without_body() {
        let app = test_app(vec![], vec![]);

        let (status, body) = send(&app.router, Method::POST, "/api/carts", None).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["products"], json!([]));
        assert_eq!(body["id"].as_str().unwrap().len(), 10);
        assert_eq!(app.carts.load_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_keeps_caller_fields() {
        let app = test_app(vec![], vec![]);

        let (status, body) = send(
            &app.router,
            Method::POST,
            "/api/carts",
            Some(json!({"owner": "ana", "products": [{"product": "p1", "quantity": 3}]})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["owner"], "ana");
        assert_eq!(body["products"], json!([{"product": "p1", "quantity": 3}]));
    }

    #[tokio::test]
    async fn test_create_keeps_item_fields() {
        let app = test_app(vec![], vec![]);
        let line = json!({"product": "p1", "quantity": 1, "note": "gift"});

        let (status, body) = send(
            &app.router,
            Method::POST,
            "/api/carts",
            Some(json!({"products": [line.clone()]})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["products"], json!([line]));
        let stored = app.carts.load_all().await.unwrap();
        assert_eq!(stored[0].items[0].fields.get("note"), Some(&json!("gift")));
    }

    #[tokio::test]
    async fn test_create_rejects_fractional_item_quantity() {
        let app = test_app(vec![], vec![]);

        let (status, _) = send(
            &app.router,
            Method::POST,
            "/api/carts",
            Some(json!({"products": [{"product": "p1", "quantity": 1.5}]})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(app.carts.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_show_missing_is_404() {
        let app = test_app(vec![], vec![empty_cart("cart000001")]);

        let (status, body) = send(&app.router, Method::GET, "/api/carts/nope", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Carrito no encontrado"}));
    }

    #[tokio::test]
    async fn test_show_empty_cart_is_empty_array() {
        let app = test_app(vec![], vec![empty_cart("cart000001")]);

        let (status, body) = send(&app.router, Method::GET, "/api/carts/cart000001", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_add_same_product_twice_merges() {
        let app = test_app(vec![], vec![empty_cart("cart000001")]);
        let uri = "/api/carts/cart000001/product/prod000001";

        for _ in 0..2 {
            let (status, body) =
                send(&app.router, Method::POST, uri, Some(json!({"quantity": 2}))).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(
                body,
                json!({"message": "Producto agregado al carrito correctamente"})
            );
        }

        let (_, items) = send(&app.router, Method::GET, "/api/carts/cart000001", None).await;
        assert_eq!(items, json!([{"product": "prod000001", "quantity": 4}]));
    }

    #[tokio::test]
    async fn test_add_without_quantity_adds_one() {
        let app = test_app(vec![], vec![empty_cart("cart000001")]);

        let (status, _) = send(
            &app.router,
            Method::POST,
            "/api/carts/cart000001/product/prod000001",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let carts = app.carts.load_all().await.unwrap();
        assert_eq!(carts[0].items[0].quantity, 1);
    }

    #[tokio::test]
    async fn test_add_to_missing_cart_is_silent() {
        let app = test_app(vec![], vec![empty_cart("cart000001")]);

        let (status, body) = send(
            &app.router,
            Method::POST,
            "/api/carts/missing000/product/prod000001",
            Some(json!({"quantity": 2})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"message": "Producto agregado al carrito correctamente"})
        );
        assert_eq!(
            app.carts.load_all().await.unwrap(),
            vec![empty_cart("cart000001")]
        );
    }

    #[tokio::test]
    async fn test_add_rejects_non_integer_quantity() {
        let app = test_app(vec![], vec![empty_cart("cart000001")]);

        let (status, _) = send(
            &app.router,
            Method::POST,
            "/api/carts/cart000001/product/prod000001",
            Some(json!({"quantity": "two"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
