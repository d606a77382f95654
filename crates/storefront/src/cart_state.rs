//! The shopper's cart, shared between request handlers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use foodie_core::{Cart, CartStore, CatalogItem, MenuItemId};
use tracing::debug;

/// Cloneable handle to the single [`CartStore`].
///
/// Each mutation, including the persistence write its observers perform,
/// runs to completion under the lock, so mutations never interleave.
#[derive(Clone, Debug)]
pub struct SharedCart {
    store: Arc<Mutex<CartStore>>,
}

impl SharedCart {
    /// Share an existing store.
    #[must_use]
    pub fn new(store: CartStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    // A panic inside an observer must not take the cart down with it.
    fn lock(&self) -> MutexGuard<'_, CartStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current cart for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Cart {
        self.lock().cart().clone()
    }

    /// Add one unit of `item` and return the updated cart.
    pub fn add_to_cart(&self, item: CatalogItem) -> Cart {
        let mut store = self.lock();
        debug!(item_id = %item.id, "Adding to cart");
        store.add_to_cart(item);
        store.cart().clone()
    }

    /// Remove the whole line for `id` and return the updated cart.
    pub fn remove_from_cart(&self, id: MenuItemId) -> Cart {
        let mut store = self.lock();
        debug!(item_id = %id, "Removing from cart");
        store.remove_from_cart(id);
        store.cart().clone()
    }

    /// Empty the cart.
    pub fn clear_cart(&self) -> Cart {
        let mut store = self.lock();
        debug!("Clearing cart");
        store.clear_cart();
        store.cart().clone()
    }
}
