//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                        - Liveness check
//! GET    /health/ready                  - Readiness check (both collections load)
//!
//! # Products
//! GET    /api/products                  - All products
//! GET    /api/products/{pid}            - One product (404 if absent)
//! POST   /api/products                  - Add product, assigns id (201)
//! PUT    /api/products/{pid}            - Merge fields, echoes the request body
//! DELETE /api/products/{pid}            - Remove product
//!
//! # Carts
//! POST   /api/carts                     - Create cart, assigns id (201)
//! GET    /api/carts/{cid}               - Items of a cart (404 if absent)
//! POST   /api/carts/{cid}/product/{pid} - Add quantity of a product to a cart
//! ```

pub mod carts;
pub mod health;
pub mod products;

use axum::{
    Router,
    body::Bytes,
    routing::{get, post},
};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::state::AppState;

/// JSON body for successful operations that return no entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{pid}",
            get(products::show)
                .put(products::update)
                .delete(products::destroy),
        )
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(carts::create))
        .route("/{cid}", get(carts::show))
        .route("/{cid}/product/{pid}", post(carts::add_product))
}

/// Create the health check router.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::live))
        .route("/ready", get(health::ready))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/health", health_routes())
        .nest("/api/products", product_routes())
        .nest("/api/carts", cart_routes())
}

/// Parse a JSON request body, treating an empty body as `T::default()`.
///
/// Content type is not enforced; the body only has to be JSON of the right
/// shape.
fn parse_body<T>(body: &Bytes) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("JSON inválido: {e}")))
}
