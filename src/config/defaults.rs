//! Built-in defaults
//!
//! These make the server usable with nothing but an API key

use crate::types::DataType;

/// FoodData Central v1 REST API
pub const DEFAULT_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";

/// Connect + read budget for a single upstream call
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_SEARCH_LIMIT: u32 = 10;
pub const MAX_SEARCH_LIMIT: u32 = 20;

/// Serving used when a tool call doesn't name one
pub const DEFAULT_AMOUNT: &str = "100g";

pub const API_KEY_ENV: &str = "USDA_API_KEY";
pub const BASE_URL_ENV: &str = "USDA_API_BASE_URL";
pub const CONFIG_PATH_ENV: &str = "NUTRIMCP_CONFIG";

pub const API_KEY_SIGNUP_URL: &str = "https://fdc.nal.usda.gov/api-guide.html";

pub fn default_data_types() -> Vec<DataType> {
    DataType::SEARCHABLE.to_vec()
}

/// Clamp a requested search limit into `1..=MAX_SEARCH_LIMIT`
pub fn clamp_search_limit(limit: i64) -> u32 {
    limit.clamp(1, MAX_SEARCH_LIMIT as i64) as u32
}
