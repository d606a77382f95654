//! Foodie Core - Cart and catalog types.
//!
//! This crate holds the parts of the Foodie storefront that carry real
//! invariants:
//! - [`types`] - Newtype IDs, validated prices, and catalog items
//! - [`cart`] - The ordered cart of line items and its merge-by-id rules
//! - [`store`] - An observable cart holder that notifies subscribers on change
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no HTTP clients. Persistence lives in the storefront crate and plugs in as a
//! [`store::CartObserver`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod store;
pub mod types;

pub use cart::{Cart, CartError, CartLine};
pub use store::{CartObserver, CartStore, SubscriptionId};
pub use types::*;
