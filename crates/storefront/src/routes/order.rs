//! Order page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use foodie_core::format_money;
use serde::Deserialize;
use tracing::instrument;

use super::cart::{CartView, ItemView, NavView};
use crate::catalog::menu::{ALL_CATEGORIES, categories, filter_by_category, order_menu};
use crate::error::add_breadcrumb;
use crate::filters;
use crate::state::AppState;

/// Order page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct OrderQuery {
    pub category: Option<String>,
}

impl OrderQuery {
    /// Selected category; blank counts as no selection.
    fn selected(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Category filter button.
#[derive(Clone)]
pub struct CategoryView {
    pub name: String,
    pub href: String,
    pub selected: bool,
}

impl CategoryView {
    fn new(name: String, selected: &str) -> Self {
        let encoded: String = url::form_urlencoded::byte_serialize(name.as_bytes()).collect();
        Self {
            href: format!("/order?category={encoded}"),
            selected: name == selected,
            name,
        }
    }
}

/// Order page template.
#[derive(Template, WebTemplate)]
#[template(path = "order/index.html")]
pub struct OrderTemplate {
    pub nav: NavView,
    pub categories: Vec<CategoryView>,
    pub items: Vec<ItemView>,
    pub cart: CartView,
    pub return_to: String,
}

/// Display the order page, filtered by category.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> impl IntoResponse {
    let menu = order_menu();
    let selected = query.selected().unwrap_or(ALL_CATEGORIES);

    let categories = categories(&menu)
        .into_iter()
        .map(|name| CategoryView::new(name, selected))
        .collect();
    let items = filter_by_category(&menu, Some(selected))
        .into_iter()
        .map(|entry| ItemView::from(&entry.item))
        .collect();

    let return_to = query.selected().map_or_else(
        || "/order".to_string(),
        |category| {
            let encoded: String =
                url::form_urlencoded::byte_serialize(category.as_bytes()).collect();
            format!("/order?category={encoded}")
        },
    );

    let cart = state.cart().snapshot();

    OrderTemplate {
        nav: NavView::from(&cart),
        categories,
        items,
        cart: CartView::from(&cart),
        return_to,
    }
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "order/confirmed.html")]
pub struct OrderConfirmedTemplate {
    pub nav: NavView,
    pub total: String,
}

/// Acknowledge the order.
///
/// Nothing is submitted anywhere and the cart is left as it was.
#[instrument(skip(state))]
pub async fn confirm(State(state): State<AppState>) -> impl IntoResponse {
    let cart = state.cart().snapshot();
    let total = format_money(cart.total_price());

    add_breadcrumb("order", "Confirmed order", Some(&[("total", &total)]));
    tracing::info!(lines = cart.line_count(), total = %total, "Order confirmed");

    OrderConfirmedTemplate {
        nav: NavView::from(&cart),
        total,
    }
}
