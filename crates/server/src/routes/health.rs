//! Health check handlers.

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn live() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable unless both collections load.
pub async fn ready(State(state): State<AppState>) -> StatusCode {
    let (products, carts) = tokio::join!(state.products().get_all(), state.carts().get_all());

    match (products, carts) {
        (Ok(_), Ok(_)) => StatusCode::OK,
        (products, carts) => {
            let config = state.config();
            if let Err(e) = products {
                tracing::warn!(
                    error = %e,
                    path = %config.products_path().display(),
                    "Product collection not ready"
                );
            }
            if let Err(e) = carts {
                tracing::warn!(
                    error = %e,
                    path = %config.carts_path().display(),
                    "Cart collection not ready"
                );
            }
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
