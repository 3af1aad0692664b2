//! Environment-driven client configuration.

use crate::error::StoreError;

/// Environment variable naming the store endpoint.
pub const ENV_STORE_URL: &str = "SIWARAS_STORE_URL";

/// HTTP client configuration.
///
/// A single endpoint serves both tenants; tenant selection travels as the
/// `db` request parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub base_url: String,
}

impl StoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_env() -> Result<Self, StoreError> {
        let base_url = std::env::var(ENV_STORE_URL)
            .map_err(|_| StoreError::Config(format!("{ENV_STORE_URL} is not set")))?;
        if base_url.trim().is_empty() {
            return Err(StoreError::Config(format!("{ENV_STORE_URL} is empty")));
        }
        Ok(Self { base_url })
    }
}
