//! Environment configuration for the API server.
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8787";
pub const DEFAULT_CATALOG: &str = "testing/fixtures/catalog.json";
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listen address (LANGCAT_ADDR)
    pub addr: String,
    /// Seed catalog file, JSON or YAML (LANGCAT_CATALOG)
    pub catalog_path: PathBuf,
    /// Per-request query deadline (LANGCAT_REQUEST_TIMEOUT_MS)
    pub request_timeout: Duration,
    /// Fallback log filter when RUST_LOG is unset (LANGCAT_LOG)
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            catalog_path: PathBuf::from(DEFAULT_CATALOG),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let request_timeout = match lookup("LANGCAT_REQUEST_TIMEOUT_MS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(_) => {
                    tracing::warn!(value = %raw, "invalid LANGCAT_REQUEST_TIMEOUT_MS, using default");
                    defaults.request_timeout
                }
            },
            None => defaults.request_timeout,
        };

        Self {
            addr: lookup("LANGCAT_ADDR").unwrap_or(defaults.addr),
            catalog_path: lookup("LANGCAT_CATALOG")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            request_timeout,
            log_level: lookup("LANGCAT_LOG").unwrap_or(defaults.log_level),
        }
    }
}
