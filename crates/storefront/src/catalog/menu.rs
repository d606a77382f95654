//! Built-in menus.

use foodie_core::{CatalogItem, MenuItemId, Price};

/// Category label that matches every entry.
pub const ALL_CATEGORIES: &str = "All";

/// A menu item with the category it is filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub item: CatalogItem,
    pub category: String,
}

impl MenuEntry {
    fn new(item: CatalogItem, category: &str) -> Self {
        Self {
            item,
            category: category.to_string(),
        }
    }
}

/// Dishes featured on the home page.
#[must_use]
pub fn popular_foods() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new(
            MenuItemId::new(1),
            "Fruit Dish",
            Price::from_units(400),
            "/static/images/fruitfish.svg",
            "A delicious fruit mix",
        ),
        CatalogItem::new(
            MenuItemId::new(2),
            "Fruit Dish",
            Price::from_units(400),
            "/static/images/fruitdish.svg",
            "A tasty fruit dish",
        ),
        CatalogItem::new(
            MenuItemId::new(3),
            "Seafood Dish",
            Price::from_units(400),
            "/static/images/seafish.svg",
            "Fresh seafood platter",
        ),
        CatalogItem::new(
            MenuItemId::new(4),
            "Pizza",
            Price::from_units(400),
            "/static/images/pizza.svg",
            "Cheesy and delicious pizza",
        ),
    ]
}

/// The order page menu.
#[must_use]
pub fn order_menu() -> Vec<MenuEntry> {
    vec![
        MenuEntry::new(
            CatalogItem::new(
                MenuItemId::new(1),
                "Margherita Pizza",
                Price::from_cents(1499),
                "/static/images/margheritapizza.svg",
                "Fresh tomatoes, mozzarella, basil",
            ),
            "Pizza",
        ),
        MenuEntry::new(
            CatalogItem::new(
                MenuItemId::new(2),
                "Chicken Burger",
                Price::from_cents(1299),
                "/static/images/Chicken-Burgers.svg",
                "Grilled chicken, lettuce, special sauce",
            ),
            "Burgers",
        ),
        MenuEntry::new(
            CatalogItem::new(
                MenuItemId::new(3),
                "Caesar Salad",
                Price::from_cents(999),
                "/static/images/shrimp.svg",
                "Romaine lettuce, croutons, parmesan",
            ),
            "Salads",
        ),
    ]
}

/// `"All"` followed by each distinct category, in order of first appearance.
#[must_use]
pub fn categories(entries: &[MenuEntry]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for entry in entries {
        if !categories.contains(&entry.category) {
            categories.push(entry.category.clone());
        }
    }
    categories
}

/// Entries in `selected`; no selection or `"All"` keeps everything.
#[must_use]
pub fn filter_by_category<'a>(
    entries: &'a [MenuEntry],
    selected: Option<&str>,
) -> Vec<&'a MenuEntry> {
    match selected {
        None | Some(ALL_CATEGORIES) => entries.iter().collect(),
        Some(category) => entries
            .iter()
            .filter(|entry| entry.category == category)
            .collect(),
    }
}
