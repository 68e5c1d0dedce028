//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `FIELDHOUSE_BACKEND_URL` - Base URL of the backend API
//!   (default: `http://127.0.0.1:8000`)
//! - `FIELDHOUSE_REQUEST_TIMEOUT_SECS` - Per-request timeout in seconds
//!   (default: no timeout)

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the backend API (Product and Order services).
    pub backend_base_url: String,
    /// Optional per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let backend_base_url =
            get_env_or_default("FIELDHOUSE_BACKEND_URL", "http://127.0.0.1:8000");
        let request_timeout_secs =
            parse_timeout(get_optional_env("FIELDHOUSE_REQUEST_TIMEOUT_SECS"))?;

        Ok(Self {
            backend_base_url,
            request_timeout_secs,
        })
    }

    /// Configuration pointing at a specific backend URL.
    ///
    /// Used by tests and demos that spawn their own backend.
    #[must_use]
    pub fn for_base_url(url: impl Into<String>) -> Self {
        Self {
            backend_base_url: url.into(),
            request_timeout_secs: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse the optional timeout variable.
fn parse_timeout(raw: Option<String>) -> Result<Option<u64>, ConfigError> {
    match raw {
        None => Ok(None),
        Some(value) => value.parse::<u64>().map(Some).map_err(|e| {
            ConfigError::InvalidEnvVar(
                "FIELDHOUSE_REQUEST_TIMEOUT_SECS".to_string(),
                e.to_string(),
            )
        }),
    }
}
