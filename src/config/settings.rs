//! Resolved settings handed to the USDA client

use crate::config::defaults::{default_data_types, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::types::DataType;
use std::fmt;
use std::time::Duration;

/// Immutable once built; shared read-only by every tool call
#[derive(Clone)]
pub struct UsdaConfig {
    pub api_key: String,
    /// Validated by the loader, never ends with '/'
    pub base_url: String,
    pub timeout: Duration,
    pub data_types: Vec<DataType>,
}

impl UsdaConfig {
    /// Defaults for everything but the key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            data_types: default_data_types(),
        }
    }

    /// Join `path` onto the base URL, keeping any path prefix the base carries
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl fmt::Debug for UsdaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UsdaConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("data_types", &self.data_types)
            .finish()
    }
}
