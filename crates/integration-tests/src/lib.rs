//! Integration tests for the Foodie storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p foodie-integration-tests
//! ```
//!
//! Tests drive the full router in-process with `tower::ServiceExt::oneshot`.
//! The remote catalog is replaced by a throwaway axum server bound to an
//! ephemeral local port, so nothing outside the test process is contacted.
//!
//! # Test Categories
//!
//! - `storefront_pages` - page rendering, routing, middleware
//! - `storefront_cart` - cart form endpoints and persistence
//! - `storefront_catalog` - remote menu fetch and the menu overlay

#![allow(clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
    routing::get,
};
use foodie_storefront::config::StorefrontConfig;
use foodie_storefront::routes;
use foodie_storefront::state::AppState;
use foodie_storefront::storage::{LocalStorage, MemoryStorage};
use tower::ServiceExt;

/// Catalog URL nothing listens on.
pub const UNREACHABLE_CATALOG: &str = "http://127.0.0.1:9/api/menus/";

/// The storefront's static assets, resolved from this crate's location.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static");

/// Largest response body the helpers will read.
const BODY_LIMIT: usize = 1024 * 1024;

/// A storefront wired to in-memory storage and a chosen catalog URL.
pub struct TestApp {
    pub state: AppState,
    pub storage: Arc<MemoryStorage>,
    router: Router,
}

/// A fully buffered response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// Parse the body as JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }
}

impl TestApp {
    /// Storefront with empty in-memory storage.
    #[must_use]
    pub fn new(catalog_url: &str) -> Self {
        Self::with_storage(catalog_url, Arc::new(MemoryStorage::new()))
    }

    /// Storefront over the given in-memory storage.
    #[must_use]
    pub fn with_storage(catalog_url: &str, storage: Arc<MemoryStorage>) -> Self {
        let config = test_config(catalog_url, None);
        let state = AppState::with_storage(config, storage.clone() as Arc<dyn LocalStorage>)
            .expect("failed to build app state");
        let router = routes::app(state.clone());

        Self {
            state,
            storage,
            router,
        }
    }

    /// Issue a `GET`.
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::get(uri)
            .body(Body::empty())
            .expect("invalid request");
        self.send(request).await
    }

    /// Issue a form-encoded `POST`.
    pub async fn post_form(&self, uri: &str, form: &str) -> TestResponse {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("invalid request");
        self.send(request).await
    }

    /// Send an arbitrary request through the router.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), BODY_LIMIT)
            .await
            .expect("failed to read body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// The raw value stored under the cart key.
    #[must_use]
    pub fn stored_cart(&self) -> Option<String> {
        self.storage
            .get_item(foodie_storefront::persistence::CART_STORAGE_KEY)
            .expect("memory storage never fails")
    }
}

/// Configuration pointing at `catalog_url`, optionally with a storage file.
#[must_use]
pub fn test_config(catalog_url: &str, storage_path: Option<&Path>) -> StorefrontConfig {
    let mut vars = HashMap::from([
        ("FOODIE_CATALOG_URL".to_string(), catalog_url.to_string()),
        ("FOODIE_CATALOG_TIMEOUT_SECS".to_string(), "2".to_string()),
        ("FOODIE_STATIC_DIR".to_string(), STATIC_DIR.to_string()),
    ]);
    if let Some(path) = storage_path {
        vars.insert(
            "FOODIE_STORAGE_PATH".to_string(),
            path.display().to_string(),
        );
    }

    StorefrontConfig::from_lookup(|key| vars.get(key).cloned()).expect("invalid test config")
}

/// Start a stand-in catalog answering `GET /api/menus/` with `status` and
/// `body`. Returns the endpoint URL.
pub async fn spawn_catalog(status: StatusCode, body: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind catalog listener");
    let addr = listener.local_addr().expect("listener has no address");

    let app = Router::new().route(
        "/api/menus/",
        get(move || async move { (status, [(header::CONTENT_TYPE, "application/json")], body) }),
    );

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://{addr}/api/menus/")
}

/// Form body for adding an item to the cart.
#[must_use]
pub fn add_form(id: i32, name: &str, price: &str, return_to: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("id", &id.to_string())
        .append_pair("name", name)
        .append_pair("price", price)
        .append_pair("src", "")
        .append_pair("description", "")
        .append_pair("return_to", return_to)
        .finish()
}
