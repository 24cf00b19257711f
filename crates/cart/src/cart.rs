//! Cart line items and the ordered cart list.

use std::collections::HashSet;

use catalog::Product;
use common::ProductId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One product line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    /// Unit price.
    pub price: f64,
    /// Image URL.
    pub image: String,
    /// Units of the product in the cart, always at least 1.
    pub amount: u32,
}

impl CartItem {
    /// Creates a single-unit line from catalog metadata.
    pub fn from_product(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount: 1,
        }
    }

    /// Returns `price * amount`.
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.amount)
    }
}

/// A persisted cart that breaks the cart invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidCart {
    #[error("product {0} appears more than once")]
    DuplicateItem(ProductId),

    #[error("product {0} has amount 0")]
    ZeroAmount(ProductId),
}

/// Ordered list of cart lines, unique by product id.
///
/// Serializes as a plain JSON array of items in insertion order.
/// Deserialization rejects duplicate ids and zero amounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Returns the line for `product_id`, if present.
    pub fn get(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    /// Sum of every line's subtotal.
    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Returns a copy with `item` appended. The caller ensures the id is new.
    pub(crate) fn with_item(&self, item: CartItem) -> Cart {
        debug_assert!(!self.contains(item.id));
        let mut items = self.items.clone();
        items.push(item);
        Cart { items }
    }

    /// Returns a copy with the amount of `product_id` replaced.
    /// Other lines, and the cart when the id is absent, are left as they are.
    pub(crate) fn with_amount(&self, product_id: ProductId, amount: u32) -> Cart {
        debug_assert!(amount > 0);
        let items = self
            .items
            .iter()
            .map(|item| {
                if item.id == product_id {
                    CartItem {
                        amount,
                        ..item.clone()
                    }
                } else {
                    item.clone()
                }
            })
            .collect();
        Cart { items }
    }

    /// Returns a copy without the line for `product_id`.
    pub(crate) fn without(&self, product_id: ProductId) -> Cart {
        let items = self
            .items
            .iter()
            .filter(|item| item.id != product_id)
            .cloned()
            .collect();
        Cart { items }
    }
}

impl TryFrom<Vec<CartItem>> for Cart {
    type Error = InvalidCart;

    fn try_from(items: Vec<CartItem>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.amount == 0 {
                return Err(InvalidCart::ZeroAmount(item.id));
            }
            if !seen.insert(item.id) {
                return Err(InvalidCart::DuplicateItem(item.id));
            }
        }
        Ok(Cart { items })
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, price: f64, amount: u32) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price,
            image: format!("https://example.com/{id}.jpg"),
            amount,
        }
    }

    fn cart(items: Vec<CartItem>) -> Cart {
        Cart::try_from(items).unwrap()
    }

    #[test]
    fn test_from_product_starts_at_one_unit() {
        let line = CartItem::from_product(Product::new(5u64, "Shoe", 100.0, "x"));
        assert_eq!(line.amount, 1);
        assert_eq!(line.title, "Shoe");
        assert_eq!(line.id, ProductId::new(5));
    }

    #[test]
    fn test_totals() {
        let cart = cart(vec![item(1, 10.5, 2), item(2, 100.0, 1)]);
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.unit_count(), 3);
        assert!((cart.total() - 121.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_with_item_appends_in_order() {
        let cart = cart(vec![item(2, 1.0, 1)]).with_item(item(1, 1.0, 1));
        let ids: Vec<u64> = cart.iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_with_amount_touches_only_matching_line() {
        let original = cart(vec![item(1, 1.0, 1), item(2, 2.0, 1)]);
        let updated = original.with_amount(ProductId::new(2), 4);

        assert_eq!(updated.get(ProductId::new(1)), original.get(ProductId::new(1)));
        assert_eq!(updated.get(ProductId::new(2)).unwrap().amount, 4);
        assert_eq!(updated.get(ProductId::new(2)).unwrap().title, "Product 2");
    }

    #[test]
    fn test_with_amount_on_unknown_id_is_identity() {
        let original = cart(vec![item(1, 1.0, 1)]);
        assert_eq!(original.with_amount(ProductId::new(9), 3), original);
    }

    #[test]
    fn test_without_removes_single_line() {
        let cart = cart(vec![item(1, 1.0, 1), item(2, 2.0, 1), item(3, 3.0, 1)])
            .without(ProductId::new(2));
        let ids: Vec<u64> = cart.iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let cart = cart(vec![item(5, 100.0, 1)]);
        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "id": 5,
                "title": "Product 5",
                "price": 100.0,
                "image": "https://example.com/5.jpg",
                "amount": 1
            }])
        );
    }

    #[test]
    fn test_serialization_roundtrip_preserves_order() {
        let original = cart(vec![item(3, 3.25, 2), item(1, 179.9, 1), item(2, 0.5, 7)]);
        let json = serde_json::to_string(&original).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = Cart::try_from(vec![item(1, 1.0, 1), item(1, 1.0, 2)]);
        assert_eq!(result, Err(InvalidCart::DuplicateItem(ProductId::new(1))));
    }

    #[test]
    fn test_rejects_zero_amount_on_deserialize() {
        let json = r#"[{"id":1,"title":"t","price":1.0,"image":"i","amount":0}]"#;
        let err = serde_json::from_str::<Cart>(json).unwrap_err();
        assert!(err.to_string().contains("amount 0"));
    }
}
