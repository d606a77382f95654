//! Cart persistence bridge.
//!
//! Loads the saved cart from [`LocalStorage`] at startup and writes the whole
//! cart back under the same key after every change. The bridge registers
//! itself with the [`CartStore`] as an observer, so views never call it
//! directly.
//!
//! Anything unreadable in storage (bad JSON, duplicate lines, a negative
//! price, a storage read error) is logged and treated as "no saved cart".

use std::sync::Arc;

use foodie_core::{Cart, CartObserver, CartStore};
use tracing::{debug, error, info, warn};

use crate::storage::LocalStorage;

/// Storage key holding the JSON-encoded cart.
pub const CART_STORAGE_KEY: &str = "cart";

/// Reads and writes the cart under [`CART_STORAGE_KEY`].
pub struct CartPersistence {
    storage: Arc<dyn LocalStorage>,
}

impl CartPersistence {
    /// Bridge over the given storage backend.
    #[must_use]
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    /// Load the saved cart, or an empty cart if there is nothing usable.
    #[must_use]
    pub fn load(&self) -> Cart {
        let raw = match self.storage.get_item(CART_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No saved cart, starting empty");
                return Cart::new();
            }
            Err(e) => {
                warn!(error = %e, "Failed to read saved cart, starting empty");
                return Cart::new();
            }
        };

        match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) => {
                info!(lines = cart.line_count(), "Restored saved cart");
                cart
            }
            Err(e) => {
                warn!(
                    error = %e,
                    value = %raw.chars().take(200).collect::<String>(),
                    "Saved cart is malformed, starting empty"
                );
                Cart::new()
            }
        }
    }

    /// Serialize and store the full cart, overwriting the previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be encoded or the storage write
    /// fails.
    pub fn save(&self, cart: &Cart) -> Result<(), PersistError> {
        let json = serde_json::to_string(cart)?;
        self.storage.set_item(CART_STORAGE_KEY, &json)?;
        Ok(())
    }
}

/// Errors raised while saving the cart.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] crate::storage::StorageError),
}

impl CartObserver for CartPersistence {
    fn on_cart_changed(&self, cart: &Cart) {
        // The mutation already happened; a failed write only costs durability.
        if let Err(e) = self.save(cart) {
            error!(error = %e, lines = cart.line_count(), "Failed to persist cart");
        }
    }
}

/// Build a cart store hydrated from `storage` and wired to save back to it.
#[must_use]
pub fn hydrated_store(storage: Arc<dyn LocalStorage>) -> CartStore {
    let persistence = Arc::new(CartPersistence::new(storage));
    let mut store = CartStore::with_cart(persistence.load());
    store.subscribe(persistence);
    store
}
