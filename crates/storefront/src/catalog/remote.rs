//! Schema for the remote catalog API.
//!
//! The API returns `[{id, image?, name, price, description?}]`. Each element
//! is decoded on its own: one bad element is logged and skipped rather than
//! hiding the rest of the menu.

use foodie_core::{CatalogItem, MenuItemId, Price};
use serde::Deserialize;
use tracing::warn;

use super::CatalogError;

/// Shown when the catalog has no description for an item.
pub const DEFAULT_DESCRIPTION: &str = "No description available";

/// One element of the catalog response, as sent over the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteMenuItem {
    pub id: MenuItemId,
    #[serde(default)]
    pub image: Option<String>,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<RemoteMenuItem> for CatalogItem {
    fn from(remote: RemoteMenuItem) -> Self {
        let description = remote
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

        Self::new(
            remote.id,
            remote.name,
            remote.price,
            remote.image.unwrap_or_default(),
            description,
        )
    }
}

/// Decode a catalog response body.
///
/// # Errors
///
/// Returns [`CatalogError::Decode`] if the body is not a JSON array. Elements
/// of the array that do not match [`RemoteMenuItem`] are skipped.
pub fn decode_menu(body: &str) -> Result<Vec<CatalogItem>, CatalogError> {
    let elements: Vec<serde_json::Value> = serde_json::from_str(body)?;

    let items = elements
        .into_iter()
        .enumerate()
        .filter_map(
            |(index, element)| match serde_json::from_value::<RemoteMenuItem>(element) {
                Ok(remote) => Some(CatalogItem::from(remote)),
                Err(e) => {
                    warn!(index, error = %e, "Skipping invalid catalog item");
                    None
                }
            },
        )
        .collect();

    Ok(items)
}
