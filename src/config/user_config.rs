//! User configuration file parsing

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub usda: UsdaSection,
}

/// `[usda]` table. The API key is deliberately not accepted here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UsdaSection {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub data_types: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: UserConfig = toml::from_str(
            r#"
            [usda]
            base_url = "http://localhost:9000/fdc/v1"
            timeout_secs = 3
            data_types = ["Foundation", "SR Legacy"]
            "#,
        )
        .unwrap();

        assert_eq!(config.usda.base_url.as_deref(), Some("http://localhost:9000/fdc/v1"));
        assert_eq!(config.usda.timeout_secs, Some(3));
        assert_eq!(config.usda.data_types.unwrap().len(), 2);
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config: UserConfig = toml::from_str("").unwrap();
        assert!(config.usda.base_url.is_none());
    }
}
