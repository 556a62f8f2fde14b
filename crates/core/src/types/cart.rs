//! Cart entity and its line items.

use serde::{Deserialize, Serialize};

use super::id::{CartId, ProductId};
use super::product::{Fields, ID_FIELD};

/// One product line in a cart.
///
/// Keys other than `product` and `quantity` are kept as sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Referenced product. Not checked against the product collection.
    pub product: ProductId,
    pub quantity: i64,
    #[serde(flatten)]
    pub fields: Fields,
}

impl CartItem {
    /// A bare line for `quantity` units of `product`.
    #[must_use]
    pub fn new(product: ProductId, quantity: i64) -> Self {
        Self {
            product,
            quantity,
            fields: Fields::new(),
        }
    }
}

/// A shopping cart.
///
/// Items are persisted under the `products` key. At most one item exists per
/// product id; see [`Cart::add_item`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    #[serde(rename = "products", default)]
    pub items: Vec<CartItem>,
    #[serde(flatten)]
    pub fields: Fields,
}

/// Request body for creating a cart.
///
/// Everything is optional: an empty body creates an empty cart.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CartDraft {
    #[serde(rename = "products", default)]
    pub items: Vec<CartItem>,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Cart {
    /// Build a cart from a request body and a freshly assigned id.
    #[must_use]
    pub fn from_draft(id: CartId, draft: CartDraft) -> Self {
        let CartDraft { items, mut fields } = draft;
        fields.remove(ID_FIELD);
        Self { id, items, fields }
    }

    /// Add `quantity` units of `product`.
    ///
    /// Increments the existing line for the product if there is one,
    /// otherwise appends a new line. Quantities are not range-checked.
    pub fn add_item(&mut self, product: ProductId, quantity: i64) {
        if let Some(item) = self.items.iter_mut().find(|item| item.product == product) {
            item.quantity = item.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartItem::new(product, quantity));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn empty_cart() -> Cart {
        Cart::from_draft(CartId::new("cart000001"), CartDraft::default())
    }

    #[test]
    fn test_add_item_merges_same_product() {
        let mut cart = empty_cart();
        cart.add_item(ProductId::new("p1"), 2);
        cart.add_item(ProductId::new("p1"), 2);

        assert_eq!(
            cart.items,
            vec![CartItem::new(ProductId::new("p1"), 4)]
        );
    }

    #[test]
    fn test_add_item_keeps_insertion_order() {
        let mut cart = empty_cart();
        cart.add_item(ProductId::new("p1"), 1);
        cart.add_item(ProductId::new("p2"), 5);
        cart.add_item(ProductId::new("p1"), 1);

        let products: Vec<&str> = cart.items.iter().map(|i| i.product.as_str()).collect();
        assert_eq!(products, ["p1", "p2"]);
        assert_eq!(cart.items[0].quantity, 2);
    }

    #[test]
    fn test_add_item_accepts_negative_quantity() {
        let mut cart = empty_cart();
        cart.add_item(ProductId::new("p1"), 3);
        cart.add_item(ProductId::new("p1"), -5);

        assert_eq!(cart.items[0].quantity, -2);
    }

    #[test]
    fn test_cart_serializes_items_as_products() {
        let mut cart = empty_cart();
        cart.add_item(ProductId::new("p1"), 1);

        assert_eq!(
            serde_json::to_value(&cart).unwrap(),
            json!({"id": "cart000001", "products": [{"product": "p1", "quantity": 1}]})
        );
    }

    #[test]
    fn test_draft_defaults_to_empty_items() {
        let draft: CartDraft = serde_json::from_value(json!({"owner": "ana"})).unwrap();
        let cart = Cart::from_draft(CartId::new("cart000002"), draft);

        assert!(cart.items.is_empty());
        assert_eq!(cart.fields.get("owner"), Some(&json!("ana")));
    }

    #[test]
    fn test_item_extra_fields_survive() {
        let draft: CartDraft = serde_json::from_value(json!({
            "products": [{"product": "p1", "quantity": 1, "note": "gift"}]
        }))
        .unwrap();
        let mut cart = Cart::from_draft(CartId::new("cart000004"), draft);
        cart.add_item(ProductId::new("p1"), 2);

        assert_eq!(
            serde_json::to_value(&cart).unwrap(),
            json!({
                "id": "cart000004",
                "products": [{"product": "p1", "quantity": 3, "note": "gift"}]
            })
        );
    }

    #[test]
    fn test_draft_id_is_replaced() {
        let draft: CartDraft = serde_json::from_value(json!({"id": "mine"})).unwrap();
        let cart = Cart::from_draft(CartId::new("cart000003"), draft);

        assert_eq!(cart.id.as_str(), "cart000003");
        assert!(cart.fields.is_empty());
    }
}
