//! Configuration loader with 3-tier precedence
//!
//! Priority order (highest to lowest):
//! 1. Environment (`USDA_API_KEY`, `USDA_API_BASE_URL`)
//! 2. User config (`--config`, ./.nutrimcp.toml, $NUTRIMCP_CONFIG or
//!    ~/.config/nutrimcp/config.toml)
//! 3. Built-in defaults

use crate::config::defaults::{API_KEY_ENV, BASE_URL_ENV, CONFIG_PATH_ENV};
use crate::config::{UsdaConfig, UserConfig};
use crate::types::{DataType, NutritionError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

pub struct ConfigLoader {
    user_config: UserConfig,
    source: Option<PathBuf>,
}

impl ConfigLoader {
    /// Load the user config file.
    ///
    /// An explicit path must exist; otherwise the well-known locations are
    /// searched and a missing file just means defaults.
    pub fn new(explicit: Option<&Path>) -> Result<Self, NutritionError> {
        if let Some(path) = explicit {
            let user_config = Self::read_user_config(path)?;
            info!("Loaded user configuration from {}", path.display());
            return Ok(Self {
                user_config,
                source: Some(path.to_path_buf()),
            });
        }

        for path in Self::candidates() {
            if path.exists() {
                let user_config = Self::read_user_config(&path)?;
                info!("Loaded user configuration from {}", path.display());
                return Ok(Self {
                    user_config,
                    source: Some(path),
                });
            }
        }

        debug!("No user config file found");
        Ok(Self::from_user_config(UserConfig::default()))
    }

    pub fn from_user_config(user_config: UserConfig) -> Self {
        Self {
            user_config,
            source: None,
        }
    }

    /// File the user config was read from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    fn candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        // Project-specific config
        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(cwd.join(".nutrimcp.toml"));
        }

        // Environment variable
        if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
            candidates.push(PathBuf::from(config_path));
        }

        // User-global config
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("nutrimcp").join("config.toml"));
        }

        candidates
    }

    fn read_user_config(path: &Path) -> Result<UserConfig, NutritionError> {
        debug!("Loading user config from: {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            NutritionError::Configuration(format!(
                "Failed to read config {}: {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            NutritionError::Configuration(format!(
                "Failed to parse config {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Resolve the client settings, taking the key and URL override from the
    /// process environment
    pub fn usda_config(&self) -> Result<UsdaConfig, NutritionError> {
        self.usda_config_with(
            std::env::var(API_KEY_ENV).ok(),
            std::env::var(BASE_URL_ENV).ok(),
        )
    }

    pub fn usda_config_with(
        &self,
        api_key: Option<String>,
        base_url_override: Option<String>,
    ) -> Result<UsdaConfig, NutritionError> {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(NutritionError::MissingApiKey(API_KEY_ENV))?;

        let mut config = UsdaConfig::with_api_key(api_key);
        let section = &self.user_config.usda;

        if let Some(base_url) = base_url_override
            .filter(|url| !url.trim().is_empty())
            .or_else(|| section.base_url.clone())
        {
            config.base_url = validate_base_url(&base_url)?;
        }

        if let Some(secs) = section.timeout_secs {
            if secs == 0 {
                return Err(NutritionError::Configuration(
                    "usda.timeout_secs must be at least 1".to_string(),
                ));
            }
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(labels) = &section.data_types {
            if labels.is_empty() {
                return Err(NutritionError::Configuration(
                    "usda.data_types must not be empty".to_string(),
                ));
            }
            config.data_types = labels.iter().cloned().map(DataType::from).collect();
            for data_type in &config.data_types {
                if let DataType::Other(label) = data_type {
                    warn!("Unrecognized data type in config, passing through: {}", label);
                }
            }
        }

        debug!("Resolved USDA config: {:?}", config);
        Ok(config)
    }
}

fn validate_base_url(raw: &str) -> Result<String, NutritionError> {
    let url = Url::parse(raw.trim()).map_err(|e| {
        NutritionError::Configuration(format!("Invalid USDA base URL '{}': {}", raw, e))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url.as_str().trim_end_matches('/').to_string()),
        other => Err(NutritionError::Configuration(format!(
            "Unsupported scheme '{}' in USDA base URL",
            other
        ))),
    }
}
