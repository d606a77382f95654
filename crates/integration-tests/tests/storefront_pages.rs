//! Integration tests for storefront pages, routing and middleware.

#![allow(clippy::unwrap_used)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use foodie_integration_tests::{TestApp, UNREACHABLE_CATALOG, add_form};

// =============================================================================
// Basics
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::new(UNREACHABLE_CATALOG);
    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let app = TestApp::new(UNREACHABLE_CATALOG);
    let response = app.get("/no-such-page").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let app = TestApp::new(UNREACHABLE_CATALOG);
    let response = app.get("/health").await;
    let id = response.headers.get("x-request-id").unwrap();
    assert!(!id.is_empty());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = TestApp::new(UNREACHABLE_CATALOG);
    let request = Request::get("/health")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.headers.get("x-request-id").unwrap(), "req-123");
}

#[tokio::test]
async fn test_menu_images_are_served() {
    let app = TestApp::new(UNREACHABLE_CATALOG);
    let page = app.get("/").await;

    for src in ["/static/images/pizza.svg", "/static/images/seafish.svg"] {
        assert!(page.body.contains(src), "home page does not use {src}");
        let response = app.get(src).await;
        assert_eq!(response.status, StatusCode::OK, "{src}");
        assert!(response.body.starts_with("<svg"));
    }
}

#[tokio::test]
async fn test_stylesheet_is_served() {
    let app = TestApp::new(UNREACHABLE_CATALOG);
    let response = app.get("/static/css/main.css").await;
    assert_eq!(response.status, StatusCode::OK);
}

// =============================================================================
// Home
// =============================================================================

#[tokio::test]
async fn test_home_page_renders() {
    let app = TestApp::new(UNREACHABLE_CATALOG);
    let response = app.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("ORDER NOW"));
    assert!(response.body.contains("Popular Foods"));
    assert!(response.body.contains("Seafood Dish"));
    assert!(response.body.contains("Add to cart $400.00"));
    assert!(response.body.contains("Go to Cart (0 items)"));
    assert!(response.body.contains("See All Menu"));
    assert!(!response.body.contains("Our Menu"));
}

#[tokio::test]
async fn test_home_counts_lines_and_nav_counts_units() {
    let app = TestApp::new(UNREACHABLE_CATALOG);
    app.post_form("/cart/add", &add_form(1, "Fruit Dish", "400", "/"))
        .await;
    app.post_form("/cart/add", &add_form(1, "Fruit Dish", "400", "/"))
        .await;
    app.post_form("/cart/add", &add_form(4, "Pizza", "400", "/"))
        .await;

    let response = app.get("/").await;
    assert!(response.body.contains("Go to Cart (2 items)"));
    assert!(response.body.contains(r#"<span class="badge">3</span>"#));
}

// =============================================================================
// Order page
// =============================================================================

#[tokio::test]
async fn test_order_page_lists_all_categories() {
    let app = TestApp::new(UNREACHABLE_CATALOG);
    let response = app.get("/order").await;

    assert_eq!(response.status, StatusCode::OK);
    for name in ["Margherita Pizza", "Chicken Burger", "Caesar Salad"] {
        assert!(response.body.contains(name), "missing {name}");
    }
    for category in ["All", "Pizza", "Burgers", "Salads"] {
        assert!(response.body.contains(category), "missing {category}");
    }
    assert!(response.body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_order_page_filters_by_category() {
    let app = TestApp::new(UNREACHABLE_CATALOG);
    let response = app.get("/order?category=Burgers").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Chicken Burger"));
    assert!(!response.body.contains("Margherita Pizza"));
    assert!(!response.body.contains("Caesar Salad"));
}

#[tokio::test]
async fn test_order_page_unknown_category_is_empty() {
    let app = TestApp::new(UNREACHABLE_CATALOG);
    let response = app.get("/order?category=Desserts").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.body.contains("Chicken Burger"));
    assert!(!response.body.contains("Margherita Pizza"));
}

#[tokio::test]
async fn test_order_sidebar_shows_cart() {
    let app = TestApp::new(UNREACHABLE_CATALOG);
    app.post_form("/cart/add", &add_form(1, "Margherita Pizza", "14.99", "/order"))
        .await;
    app.post_form("/cart/add", &add_form(1, "Margherita Pizza", "14.99", "/order"))
        .await;

    let response = app.get("/order").await;
    assert!(!response.body.contains("Your cart is empty."));
    assert!(response.body.contains("Total: $29.98"));
    assert!(response.body.contains("Confirm Order"));
}

#[tokio::test]
async fn test_confirm_order_keeps_cart() {
    let app = TestApp::new(UNREACHABLE_CATALOG);
    app.post_form("/cart/add", &add_form(3, "Caesar Salad", "9.99", "/order"))
        .await;

    let response = app.post_form("/order/confirm", "").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Order confirmed! Total: $9.99"));
    assert_eq!(app.state.cart().snapshot().line_count(), 1);
}

// =============================================================================
// Cart page
// =============================================================================

#[tokio::test]
async fn test_cart_page_empty() {
    let app = TestApp::new(UNREACHABLE_CATALOG);
    let response = app.get("/ShoppingCart").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_cart_page_lists_lines() {
    let app = TestApp::new(UNREACHABLE_CATALOG);
    app.post_form("/cart/add", &add_form(2, "Chicken Burger", "12.99", "/ShoppingCart"))
        .await;
    app.post_form("/cart/add", &add_form(3, "Caesar Salad", "9.99", "/ShoppingCart"))
        .await;

    let response = app.get("/ShoppingCart").await;
    assert!(response.body.contains("Chicken Burger"));
    assert!(response.body.contains("Caesar Salad"));
    assert!(response.body.contains("Total: $22.98"));
    assert!(!response.body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_legacy_cart_path_redirects() {
    let app = TestApp::new(UNREACHABLE_CATALOG);
    let response = app.get("/cart").await;

    assert!(response.status.is_redirection());
    assert_eq!(response.location(), Some("/ShoppingCart"));
}
