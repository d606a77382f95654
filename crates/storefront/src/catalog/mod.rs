//! Menu catalog: the built-in menus and the remote catalog client.
//!
//! # Sources
//!
//! - [`menu`] - static menus shown on the home and order pages
//! - [`CatalogClient`] - fetches the full menu from the catalog API
//!
//! Remote responses pass through [`remote::decode_menu`], which turns the
//! loosely-shaped JSON into validated [`foodie_core::CatalogItem`]s.

mod client;
pub mod menu;
pub mod remote;

pub use client::CatalogClient;
pub use menu::{ALL_CATEGORIES, MenuEntry};

use thiserror::Error;

/// Errors that can occur when fetching the remote catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure: connection refused, timeout, TLS, etc.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog answered with a non-success status.
    #[error("catalog returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body is not a JSON array.
    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
