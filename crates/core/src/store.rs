//! Observable cart holder.
//!
//! [`CartStore`] owns the [`Cart`] and is the only way views mutate it. Every
//! mutation notifies the registered [`CartObserver`]s after it has been
//! applied, which is how persistence and any other listeners stay in sync.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use foodie_core::{Cart, CartStore, CatalogItem, MenuItemId, Price};
//!
//! let changes = Arc::new(AtomicUsize::new(0));
//! let seen = Arc::clone(&changes);
//!
//! let mut store = CartStore::new();
//! store.subscribe(Arc::new(move |_: &Cart| {
//!     seen.fetch_add(1, Ordering::SeqCst);
//! }));
//!
//! let pizza = CatalogItem::new(MenuItemId::new(4), "Pizza", Price::from_units(400), "", "");
//! store.add_to_cart(pizza.clone());
//! store.add_to_cart(pizza);
//!
//! assert_eq!(store.cart().line_count(), 1);
//! assert_eq!(changes.load(Ordering::SeqCst), 2);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::cart::{Cart, CartLine};
use crate::types::{CatalogItem, MenuItemId};

/// Receives the full cart after every change.
pub trait CartObserver: Send + Sync {
    /// Called once per mutation with the updated cart.
    fn on_cart_changed(&self, cart: &Cart);
}

impl<F> CartObserver for F
where
    F: Fn(&Cart) + Send + Sync,
{
    fn on_cart_changed(&self, cart: &Cart) {
        self(cart);
    }
}

/// Handle returned by [`CartStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The cart plus the observers that want to hear about changes to it.
#[derive(Default)]
pub struct CartStore {
    cart: Cart,
    observers: Vec<(SubscriptionId, Arc<dyn CartObserver>)>,
    next_subscription: u64,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// An empty store with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store starting from a previously saved cart.
    #[must_use]
    pub fn with_cart(cart: Cart) -> Self {
        Self {
            cart,
            ..Self::default()
        }
    }

    /// Current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current lines, in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Replace the cart with a loaded one.
    ///
    /// Observers are not notified: loading a saved cart is not a change that
    /// needs to be written back.
    pub fn hydrate(&mut self, cart: Cart) {
        self.cart = cart;
    }

    /// Add one unit of `item`, merging with an existing line of the same id.
    pub fn add_to_cart(&mut self, item: CatalogItem) {
        self.cart.add(item);
        self.notify();
    }

    /// Remove the whole line for `id`. Observers are notified even when no
    /// line matched.
    pub fn remove_from_cart(&mut self, id: MenuItemId) {
        self.cart.remove(id);
        self.notify();
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.notify();
    }

    /// Register an observer. Observers run in subscription order.
    pub fn subscribe(&mut self, observer: Arc<dyn CartObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, observer));
        id
    }

    /// Drop an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    /// Number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn notify(&self) {
        for (_, observer) in &self.observers {
            observer.on_cart_changed(&self.cart);
        }
    }
}
