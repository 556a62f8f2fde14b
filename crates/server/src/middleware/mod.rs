//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transaction)
//! 2. `TraceLayer` (`http_request` span per request)
//! 3. Request ID (recorded on the span opened by the trace layer)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
