//! Cart route handlers.
//!
//! Cart mutations are plain HTML form posts. Each handler updates the shared
//! cart and answers with a `303 See Other` back to the page the form came
//! from, so a refresh never re-submits.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use foodie_core::{Cart, CartLine, CatalogItem, MenuItemId, Price, format_money};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, add_breadcrumb};
use crate::filters;
use crate::state::AppState;

/// Where cart forms land when they do not say otherwise.
pub const CART_PATH: &str = "/ShoppingCart";

// =============================================================================
// View Types
// =============================================================================

/// Catalog item display data for templates.
///
/// `price_value` is the raw decimal the add-to-cart form posts back;
/// `price` is the formatted string shown to the shopper.
#[derive(Clone)]
pub struct ItemView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub price_value: String,
    pub src: String,
    pub has_image: bool,
    pub description: String,
}

impl From<&CatalogItem> for ItemView {
    fn from(item: &CatalogItem) -> Self {
        Self {
            id: item.id.as_i32(),
            name: item.name.clone(),
            price: item.price.to_string(),
            price_value: item.price.amount().normalize().to_string(),
            src: item.src.clone(),
            has_image: item.has_image(),
            description: item.description.clone(),
        }
    }
}

/// Cart line display data for templates.
///
/// Carries the same fields as [`ItemView`] so the `+` button can re-post the
/// line's item through the shared add-to-cart form fields.
#[derive(Clone)]
pub struct CartLineView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub price_value: String,
    pub src: String,
    pub has_image: bool,
    pub description: String,
    pub quantity: u32,
    pub line_price: String,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        let item = ItemView::from(&line.item);
        Self {
            id: item.id,
            name: item.name,
            price: item.price,
            price_value: item.price_value,
            src: item.src,
            has_image: item.has_image,
            description: item.description,
            quantity: line.quantity,
            line_price: format_money(line.line_total()),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub line_count: usize,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            total: format_money(cart.total_price()),
            line_count: cart.line_count(),
            item_count: cart.item_count(),
        }
    }
}

/// Navigation bar data shared by every page.
#[derive(Clone)]
pub struct NavView {
    pub cart_count: u32,
}

impl From<&Cart> for NavView {
    fn from(cart: &Cart) -> Self {
        Self {
            cart_count: cart.item_count(),
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
///
/// The form carries the whole item because remote catalog items are not
/// known to the server. Any `quantity` field is ignored.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: MenuItemId,
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub description: String,
    pub return_to: Option<String>,
}

impl AddToCartForm {
    fn into_item(self) -> Result<(CatalogItem, Option<String>), AppError> {
        let price: Price = self
            .price
            .parse()
            .map_err(|e| AppError::BadRequest(format!("{e}")))?;
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("item name is required".to_string()));
        }

        let item = CatalogItem::new(self.id, self.name, price, self.src, self.description);
        Ok((item, self.return_to))
    }
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: MenuItemId,
    pub return_to: Option<String>,
}

/// Clear cart form data.
#[derive(Debug, Deserialize)]
pub struct ClearCartForm {
    pub return_to: Option<String>,
}

/// Resolve a form's `return_to` into a safe local redirect target.
///
/// Only absolute paths on this site are accepted; anything else (including
/// protocol-relative `//host` URLs) falls back to the cart page.
#[must_use]
pub fn safe_return_path(return_to: Option<&str>) -> String {
    match return_to.map(str::trim) {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.starts_with("/\\")
                && !path.chars().any(char::is_control) =>
        {
            path.to_string()
        }
        _ => CART_PATH.to_string(),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub nav: NavView,
    pub cart: CartView,
    pub return_to: String,
}

/// Display cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let cart = state.cart().snapshot();

    CartShowTemplate {
        nav: NavView::from(&cart),
        cart: CartView::from(&cart),
        return_to: CART_PATH.to_string(),
    }
}

/// Legacy `/cart` link target.
pub async fn legacy_redirect() -> Redirect {
    Redirect::permanent(CART_PATH)
}

/// Add one unit of an item to the cart.
#[instrument(skip(state, form), fields(item_id = %form.id))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect, AppError> {
    let (item, return_to) = form.into_item()?;
    let id = item.id.to_string();

    let cart = state.cart().add_to_cart(item);
    add_breadcrumb("cart", "Added item", Some(&[("item_id", &id)]));
    tracing::info!(lines = cart.line_count(), "Item added to cart");

    Ok(Redirect::to(&safe_return_path(return_to.as_deref())))
}

/// Remove an item's whole line from the cart.
#[instrument(skip(state, form), fields(item_id = %form.id))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> Redirect {
    let cart = state.cart().remove_from_cart(form.id);
    add_breadcrumb(
        "cart",
        "Removed item",
        Some(&[("item_id", &form.id.to_string())]),
    );
    tracing::info!(lines = cart.line_count(), "Item removed from cart");

    Redirect::to(&safe_return_path(form.return_to.as_deref()))
}

/// Empty the cart.
#[instrument(skip(state, form))]
pub async fn clear(State(state): State<AppState>, Form(form): Form<ClearCartForm>) -> Redirect {
    state.cart().clear_cart();
    add_breadcrumb("cart", "Cleared cart", None);
    tracing::info!("Cart cleared");

    Redirect::to(&safe_return_path(form.return_to.as_deref()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_return_path_accepts_local_paths() {
        assert_eq!(safe_return_path(Some("/")), "/");
        assert_eq!(safe_return_path(Some("/order?category=Pizza")), "/order?category=Pizza");
        assert_eq!(safe_return_path(Some(" /menu ")), "/menu");
    }

    #[test]
    fn test_safe_return_path_rejects_external_targets() {
        assert_eq!(safe_return_path(None), CART_PATH);
        assert_eq!(safe_return_path(Some("")), CART_PATH);
        assert_eq!(safe_return_path(Some("https://evil.example")), CART_PATH);
        assert_eq!(safe_return_path(Some("//evil.example")), CART_PATH);
        assert_eq!(safe_return_path(Some("/\\evil.example")), CART_PATH);
        assert_eq!(safe_return_path(Some("/ok\r\nSet-Cookie: x")), CART_PATH);
    }

    #[test]
    fn test_add_form_rejects_bad_price() {
        let form = AddToCartForm {
            id: MenuItemId::new(1),
            name: "Pizza".to_string(),
            price: "-4".to_string(),
            src: String::new(),
            description: String::new(),
            return_to: None,
        };
        assert!(matches!(form.into_item(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_add_form_rejects_price_above_ceiling() {
        let form = AddToCartForm {
            id: MenuItemId::new(1),
            name: "Pizza".to_string(),
            price: "79228162514264337593543950335".to_string(),
            src: String::new(),
            description: String::new(),
            return_to: None,
        };
        assert!(matches!(form.into_item(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_add_form_builds_item() {
        let form = AddToCartForm {
            id: MenuItemId::new(2),
            name: "Chicken Burger".to_string(),
            price: "12.99".to_string(),
            src: "/static/images/Chicken-Burgers.svg".to_string(),
            description: "Grilled chicken".to_string(),
            return_to: Some("/order".to_string()),
        };
        let (item, return_to) = form.into_item().unwrap();
        assert_eq!(item.price, Price::from_cents(1299));
        assert_eq!(item.name, "Chicken Burger");
        assert_eq!(return_to.as_deref(), Some("/order"));
    }

    #[test]
    fn test_cart_view_formats_totals() {
        let mut cart = Cart::new();
        let pizza = CatalogItem::new(
            MenuItemId::new(1),
            "Margherita Pizza",
            Price::from_cents(1499),
            "",
            "",
        );
        cart.add(pizza.clone());
        cart.add(pizza);

        let view = CartView::from(&cart);
        assert_eq!(view.total, "$29.98");
        assert_eq!(view.line_count, 1);
        assert_eq!(view.item_count, 2);
        assert_eq!(view.lines.first().map(|l| l.line_price.as_str()), Some("$29.98"));
        assert_eq!(view.lines.first().map(|l| l.price_value.as_str()), Some("14.99"));
    }
}
