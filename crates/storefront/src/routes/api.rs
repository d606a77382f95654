//! JSON API endpoints.
//!
//! Read-only views of the cart and the remote menu, in the same JSON shapes
//! used for storage and by the catalog.

use axum::{Json, extract::State};
use foodie_core::{Cart, CatalogItem};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// Current cart as a JSON array of lines.
#[instrument(skip(state))]
pub async fn cart(State(state): State<AppState>) -> Json<Cart> {
    Json(state.cart().snapshot())
}

/// Remote menu after decoding.
///
/// Unlike the menu overlay, a catalog failure is reported as `502`.
#[instrument(skip(state))]
pub async fn menu(State(state): State<AppState>) -> Result<Json<Vec<CatalogItem>>> {
    let items = state.catalog().fetch_menu().await?;
    Ok(Json(items))
}
