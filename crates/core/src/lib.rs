//! Tienda Core - Shared domain types.
//!
//! This crate provides the types used across all Tienda components:
//! - `server` - HTTP API over the product and cart collections
//! - `cli` - Command-line tools for managing the collection files
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no file access, no
//! HTTP. Persistence lives in the server crate behind a store trait.
//!
//! # Modules
//!
//! - [`types`] - Entity ids, products, carts, and unique id generation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
