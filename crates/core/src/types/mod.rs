//! Core types for Tienda.
//!
//! Entities keep an explicit, typed `id` and carry every other caller-supplied
//! field through untouched.

pub mod cart;
pub mod id;
pub mod product;

pub use cart::{Cart, CartDraft, CartItem};
pub use id::*;
pub use product::{Fields, Product};
