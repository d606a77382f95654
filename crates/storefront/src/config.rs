//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `FOODIE_HOST` - Bind address (default: 127.0.0.1)
//! - `FOODIE_PORT` - Listen port (default: 3000)
//! - `FOODIE_STORAGE_PATH` - Local storage file (default: .foodie/local_storage.json)
//! - `FOODIE_STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `FOODIE_CATALOG_URL` - Remote menu endpoint (default: <http://127.0.0.1:8000/api/menus/>)
//! - `FOODIE_CATALOG_TIMEOUT_SECS` - Catalog request timeout (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_CATALOG_URL: &str = "http://127.0.0.1:8000/api/menus/";
const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// File backing the local key/value storage
    pub storage_path: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Remote catalog configuration
    pub catalog: CatalogConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
}

/// Remote catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Menu listing endpoint
    pub url: Url,
    /// Per-request timeout
    pub timeout: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let host = env
            .or_default("FOODIE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("FOODIE_HOST".to_string(), e.to_string()))?;
        let port = env
            .or_default("FOODIE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("FOODIE_PORT".to_string(), e.to_string()))?;
        let storage_path =
            PathBuf::from(env.or_default("FOODIE_STORAGE_PATH", ".foodie/local_storage.json"));
        let static_dir =
            PathBuf::from(env.or_default("FOODIE_STATIC_DIR", "crates/storefront/static"));

        let catalog = CatalogConfig::from_env(&env)?;

        Ok(Self {
            host,
            port,
            storage_path,
            static_dir,
            catalog,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CatalogConfig {
    fn from_env<F>(env: &Env<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = env.or_default("FOODIE_CATALOG_URL", DEFAULT_CATALOG_URL);
        let url = Url::parse(&raw_url).map_err(|e| {
            ConfigError::InvalidEnvVar("FOODIE_CATALOG_URL".to_string(), e.to_string())
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "FOODIE_CATALOG_URL".to_string(),
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        let timeout_secs = env
            .or_default(
                "FOODIE_CATALOG_TIMEOUT_SECS",
                &DEFAULT_CATALOG_TIMEOUT_SECS.to_string(),
            )
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("FOODIE_CATALOG_TIMEOUT_SECS".to_string(), e.to_string())
            })?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "FOODIE_CATALOG_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup with the defaulting rules shared by every setting.
struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable; blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(
            config.storage_path,
            PathBuf::from(".foodie/local_storage.json")
        );
        assert_eq!(config.catalog.url.as_str(), "http://127.0.0.1:8000/api/menus/");
        assert_eq!(config.catalog.timeout, Duration::from_secs(10));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("FOODIE_HOST", "0.0.0.0"),
            ("FOODIE_PORT", "8080"),
            ("FOODIE_STORAGE_PATH", "/tmp/foodie.json"),
            ("FOODIE_CATALOG_URL", "https://menus.example.com/api/menus/"),
            ("FOODIE_CATALOG_TIMEOUT_SECS", "3"),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.storage_path, PathBuf::from("/tmp/foodie.json"));
        assert_eq!(config.catalog.url.host_str(), Some("menus.example.com"));
        assert_eq!(config.catalog.timeout, Duration::from_secs(3));
        assert!(config.sentry_dsn.is_some());
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = config_from(&[("FOODIE_PORT", "  "), ("SENTRY_DSN", "")]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("FOODIE_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "FOODIE_PORT"));
    }

    #[test]
    fn test_invalid_catalog_url() {
        assert!(config_from(&[("FOODIE_CATALOG_URL", "not a url")]).is_err());
        assert!(config_from(&[("FOODIE_CATALOG_URL", "ftp://menus/")]).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(config_from(&[("FOODIE_CATALOG_TIMEOUT_SECS", "0")]).is_err());
    }
}
