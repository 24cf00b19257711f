//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use cart::CART_STORAGE_KEY;

/// Service configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `CATALOG_API_URL` — base URL of the stock/product API (default: `"http://localhost:3333"`)
/// - `CART_STORAGE_DIR` — directory holding the cart snapshot (default: `"./data"`)
/// - `CART_STORAGE_KEY` — snapshot key (default: `"@RocketShoes:cart"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub catalog_api_url: String,
    pub storage_dir: PathBuf,
    pub storage_key: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: var("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: var("RUST_LOG").unwrap_or(defaults.log_level),
            catalog_api_url: var("CATALOG_API_URL").unwrap_or(defaults.catalog_api_url),
            storage_dir: var("CART_STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
            storage_key: var("CART_STORAGE_KEY").unwrap_or(defaults.storage_key),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            catalog_api_url: "http://localhost:3333".to_string(),
            storage_dir: PathBuf::from("./data"),
            storage_key: CART_STORAGE_KEY.to_string(),
        }
    }
}
