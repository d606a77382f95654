//! Application state shared across handlers.

use std::sync::Arc;

use crate::cart_state::SharedCart;
use crate::catalog::{CatalogClient, CatalogError};
use crate::config::StorefrontConfig;
use crate::persistence::hydrated_store;
use crate::storage::{FileStorage, LocalStorage};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// shopper's cart, the catalog client, and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    cart: SharedCart,
    catalog: CatalogClient,
}

impl AppState {
    /// Create application state backed by the configured storage file.
    ///
    /// The saved cart, if any, is loaded before this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog HTTP client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, CatalogError> {
        let storage = Arc::new(FileStorage::new(config.storage_path.clone()));
        Self::with_storage(config, storage)
    }

    /// Create application state over an explicit storage backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog HTTP client cannot be built.
    pub fn with_storage(
        config: StorefrontConfig,
        storage: Arc<dyn LocalStorage>,
    ) -> Result<Self, CatalogError> {
        let catalog = CatalogClient::new(&config.catalog)?;
        let cart = SharedCart::new(hydrated_store(storage));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                cart,
                catalog,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the shopper's cart.
    #[must_use]
    pub fn cart(&self) -> &SharedCart {
        &self.inner.cart
    }

    /// Get a reference to the remote catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }
}
