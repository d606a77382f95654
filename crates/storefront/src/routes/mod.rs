//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /menu                   - Home page with the remote menu overlay open
//! GET  /health                 - Health check
//!
//! # Ordering
//! GET  /order?category=        - Order page, filtered by category
//! POST /order/confirm          - Order confirmation
//!
//! # Cart (form posts, 303 back to `return_to`)
//! GET  /ShoppingCart           - Cart page
//! GET  /cart                   - Redirect to /ShoppingCart
//! POST /cart/add               - Add one unit of an item
//! POST /cart/remove            - Remove an item's line
//! POST /cart/clear             - Empty the cart
//!
//! # JSON API
//! GET  /api/cart               - Current cart
//! GET  /api/menu               - Remote menu
//! ```

pub mod api;
pub mod cart;
pub mod home;
pub mod order;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::error::AppError;
use crate::middleware::{make_request_span, request_id_middleware};
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::legacy_redirect))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(order::index))
        .route("/confirm", post(order::confirm))
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(api::cart))
        .route("/menu", get(api::menu))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        .route("/menu", get(home::menu))
        // Cart page
        .route(cart::CART_PATH, get(cart::show))
        // Cart redirect and form endpoints
        .nest("/cart", cart_routes())
        // Order page
        .nest("/order", order_routes())
        // JSON API
        .nest("/api", api_routes())
}

/// Build the full application: routes, static assets and middleware.
pub fn app(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config().static_dir);

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", static_dir)
        .fallback(not_found)
        .with_state(state)
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn not_found() -> AppError {
    AppError::NotFound("page".to_string())
}
