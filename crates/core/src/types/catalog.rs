//! Purchasable product definitions.

use serde::{Deserialize, Serialize};

use super::{MenuItemId, Price};

/// A purchasable menu item.
///
/// Field order matches the persisted cart format
/// (`{id, src, name, price, description, quantity}`), minus the quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Identifier, unique within a catalog.
    pub id: MenuItemId,
    /// Image reference; empty when the item has no image.
    #[serde(default)]
    pub src: String,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

impl CatalogItem {
    /// Create a catalog item.
    #[must_use]
    pub fn new(
        id: MenuItemId,
        name: impl Into<String>,
        price: Price,
        src: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            src: src.into(),
            name: name.into(),
            price,
            description: description.into(),
        }
    }

    /// Returns true if the item has an image to show.
    #[must_use]
    pub fn has_image(&self) -> bool {
        !self.src.trim().is_empty()
    }
}
