//! Home page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use super::cart::{ItemView, NavView};
use crate::catalog::menu::popular_foods;
use crate::filters;
use crate::state::AppState;

/// Hero section configuration.
#[derive(Clone)]
pub struct HeroConfig {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub cta_text: &'static str,
    pub cta_link: &'static str,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            title: "Delicious food, delivered to your door",
            subtitle: "Fresh dishes from our kitchen, made to order.",
            cta_text: "ORDER NOW",
            cta_link: "/order",
        }
    }
}

/// Menu overlay contents.
///
/// An empty `items` list renders the "no menu items" message.
#[derive(Clone)]
pub struct MenuOverlayView {
    pub items: Vec<ItemView>,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: NavView,
    /// Hero banner configuration.
    pub hero: HeroConfig,
    /// Dishes in the "Popular Foods" grid.
    pub popular: Vec<ItemView>,
    /// Number of cart lines, for the "Go to Cart" link.
    pub cart_lines: usize,
    /// Present when the menu overlay is open.
    pub menu: Option<MenuOverlayView>,
    /// Where add-to-cart forms on this page redirect back to.
    pub return_to: String,
}

impl HomeTemplate {
    fn new(state: &AppState, menu: Option<MenuOverlayView>, return_to: &str) -> Self {
        let cart = state.cart().snapshot();

        Self {
            nav: NavView::from(&cart),
            hero: HeroConfig::default(),
            popular: popular_foods().iter().map(ItemView::from).collect(),
            cart_lines: cart.line_count(),
            menu,
            return_to: return_to.to_string(),
        }
    }
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    HomeTemplate::new(&state, None, "/")
}

/// Display the home page with the full menu overlay open.
///
/// The menu comes from the remote catalog. A failed fetch is logged and the
/// overlay opens with no items.
#[instrument(skip(state))]
pub async fn menu(State(state): State<AppState>) -> impl IntoResponse {
    let items = state.catalog().fetch_menu().await.map_or_else(
        |e| {
            tracing::error!("Failed to fetch menu: {e}");
            Vec::new()
        },
        |items| items.iter().map(ItemView::from).collect(),
    );

    HomeTemplate::new(&state, Some(MenuOverlayView { items }), "/menu")
}
