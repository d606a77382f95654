//! Remote catalog client.
//!
//! One `GET` per call: no retries, no backoff, no caching. The request
//! timeout comes from [`CatalogConfig`].

use std::sync::Arc;

use foodie_core::CatalogItem;
use tracing::{debug, instrument};
use url::Url;

use super::CatalogError;
use super::remote::decode_menu;
use crate::config::CatalogConfig;

/// Client for the menu catalog API.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    endpoint: Url,
}

impl CatalogClient {
    /// Create a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                endpoint: config.url.clone(),
            }),
        })
    }

    /// Endpoint this client fetches from.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Fetch the full menu.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the catalog answers with a
    /// non-success status, or the body is not a JSON array.
    #[instrument(skip(self), fields(endpoint = %self.inner.endpoint))]
    pub async fn fetch_menu(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        let response = self
            .inner
            .client
            .get(self.inner.endpoint.clone())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let items = decode_menu(&body).inspect_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to decode catalog response"
            );
        })?;

        debug!(count = items.len(), "Fetched catalog");
        Ok(items)
    }
}
