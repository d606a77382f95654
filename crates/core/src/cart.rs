//! The shopper's cart.
//!
//! A [`Cart`] is an ordered list of [`CartLine`]s, kept in the order items
//! were first added. It holds at most one line per [`MenuItemId`] and every
//! line has a quantity of at least one.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CatalogItem, MenuItemId};

/// Errors raised when a list of lines does not form a valid cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Two lines share the same menu item id.
    #[error("duplicate cart line for item {0}")]
    DuplicateLine(MenuItemId),
    /// A line has a quantity of zero.
    #[error("cart line for item {0} has zero quantity")]
    ZeroQuantity(MenuItemId),
}

/// A catalog item together with how many of it are in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub quantity: u32,
}

impl CartLine {
    /// A fresh line holding a single unit of `item`.
    #[must_use]
    pub const fn single(item: CatalogItem) -> Self {
        Self { item, quantity: 1 }
    }

    /// Menu item id of this line.
    #[must_use]
    pub const fn id(&self) -> MenuItemId {
        self.item.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.item.price.times(self.quantity)
    }
}

/// Ordered cart contents.
///
/// Serializes as a plain JSON array of lines. Deserialization re-checks the
/// cart invariants, so a stored value with duplicate ids or zero quantities is
/// rejected instead of loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from existing lines, checking the invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::DuplicateLine`] if two lines share an id, or
    /// [`CartError::ZeroQuantity`] if a line has no units.
    pub fn from_lines(lines: Vec<CartLine>) -> Result<Self, CartError> {
        for (index, line) in lines.iter().enumerate() {
            if line.quantity == 0 {
                return Err(CartError::ZeroQuantity(line.id()));
            }
            if lines.iter().take(index).any(|earlier| earlier.id() == line.id()) {
                return Err(CartError::DuplicateLine(line.id()));
            }
        }
        Ok(Self { lines })
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up the line for a menu item.
    #[must_use]
    pub fn line(&self, id: MenuItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// True when the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity))
    }

    /// Sum of every line's price times quantity.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |total, line| total.saturating_add(line.line_total()))
    }

    /// Add one unit of `item`.
    ///
    /// If a line with the same id exists its quantity goes up by exactly one
    /// and the stored item details are kept. Otherwise a new line with
    /// quantity one is appended.
    pub fn add(&mut self, item: CatalogItem) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id() == item.id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine::single(item));
        }
    }

    /// Remove the whole line for `id`, whatever its quantity.
    ///
    /// Returns true if a line was removed.
    pub fn remove(&mut self, id: MenuItemId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id() != id);
        self.lines.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl TryFrom<Vec<CartLine>> for Cart {
    type Error = CartError;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        Self::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::Price;

    fn item(id: i32, price: u32) -> CatalogItem {
        CatalogItem::new(
            MenuItemId::new(id),
            format!("Dish {id}"),
            Price::from_units(price),
            format!("/static/images/dish-{id}.jpg"),
            "Tasty",
        )
    }

    #[test]
    fn test_add_twice_merges_into_one_line() {
        let mut cart = Cart::new();
        cart.add(item(1, 10));
        cart.add(item(1, 10));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(format!("{:.2}", cart.total_price()), "20.00");
    }

    #[test]
    fn test_add_ignores_details_of_repeat_item() {
        let mut cart = Cart::new();
        cart.add(item(1, 10));

        let mut renamed = item(1, 99);
        renamed.name = "Something else".to_string();
        cart.add(renamed);

        let line = cart.line(MenuItemId::new(1)).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.item.name, "Dish 1");
        assert_eq!(line.item.price, Price::from_units(10));
    }

    #[test]
    fn test_add_keeps_first_added_order() {
        let mut cart = Cart::new();
        cart.add(item(3, 1));
        cart.add(item(1, 1));
        cart.add(item(3, 1));
        cart.add(item(2, 1));

        let ids: Vec<i32> = cart.lines().iter().map(|l| l.id().as_i32()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_quantity_matches_number_of_adds() {
        let mut cart = Cart::new();
        for n in 1..=7 {
            cart.add(item(4, 2));
            cart.add(item(5, 2));
            assert_eq!(cart.line(MenuItemId::new(4)).unwrap().quantity, n);
        }
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.item_count(), 14);
    }

    #[test]
    fn test_remove_deletes_whole_line() {
        let mut cart = Cart::new();
        for _ in 0..3 {
            cart.add(item(1, 5));
        }
        cart.add(item(2, 5));

        assert!(cart.remove(MenuItemId::new(1)));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].id(), MenuItemId::new(2));
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.add(item(1, 5));

        assert!(cart.remove(MenuItemId::new(1)));
        assert!(!cart.remove(MenuItemId::new(1)));
        assert!(!cart.remove(MenuItemId::new(1)));
        assert!(cart.line(MenuItemId::new(1)).is_none());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(item(1, 5));
        cart.add(item(2, 5));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[test]
    fn test_from_lines_rejects_duplicates() {
        let lines = vec![CartLine::single(item(1, 1)), CartLine::single(item(1, 2))];
        assert_eq!(
            Cart::from_lines(lines),
            Err(CartError::DuplicateLine(MenuItemId::new(1)))
        );
    }

    #[test]
    fn test_from_lines_rejects_zero_quantity() {
        let lines = vec![CartLine {
            item: item(2, 1),
            quantity: 0,
        }];
        assert_eq!(
            Cart::from_lines(lines),
            Err(CartError::ZeroQuantity(MenuItemId::new(2)))
        );
    }

    #[test]
    fn test_serialized_shape() {
        let mut cart = Cart::new();
        cart.add(item(1, 10));

        let value = serde_json::to_value(&cart).unwrap();
        let line = &value.as_array().unwrap()[0];
        assert_eq!(line["id"], 1);
        assert_eq!(line["name"], "Dish 1");
        assert_eq!(line["src"], "/static/images/dish-1.jpg");
        assert_eq!(line["description"], "Tasty");
        assert_eq!(line["quantity"], 1);
        assert!(line["price"].is_number());
    }

    #[test]
    fn test_json_roundtrip_preserves_order() {
        let mut cart = Cart::new();
        cart.add(item(2, 3));
        cart.add(item(1, 4));
        cart.add(item(2, 3));

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_deserialize_rejects_invalid_lines() {
        let json = r#"[
            {"id": 1, "src": "", "name": "A", "price": 1, "description": "", "quantity": 1},
            {"id": 1, "src": "", "name": "A", "price": 1, "description": "", "quantity": 2}
        ]"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }

    #[test]
    fn test_total_at_price_ceiling_does_not_overflow() {
        let lines = (1..=4)
            .map(|id| CartLine {
                item: CatalogItem::new(MenuItemId::new(id), "Dear", Price::MAX, "", ""),
                quantity: u32::MAX,
            })
            .collect();
        let mut cart = Cart::from_lines(lines).unwrap();
        cart.add(CatalogItem::new(MenuItemId::new(1), "Dear", Price::MAX, "", ""));

        let expected = Price::MAX.times(u32::MAX) * Decimal::from(4);
        assert_eq!(cart.total_price(), expected);
        assert_eq!(cart.item_count(), u32::MAX);
    }

    #[test]
    fn test_deserialize_rejects_oversized_price() {
        let json = r#"[
            {"id": 1, "src": "", "name": "A", "price": 79228162514264337593543950335, "description": "", "quantity": 2}
        ]"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }
}
