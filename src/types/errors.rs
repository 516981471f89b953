use thiserror::Error;

#[derive(Error, Debug)]
pub enum NutritionError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{0} environment variable required")]
    MissingApiKey(&'static str),

    #[error("USDA API error {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("USDA API request failed: {0}")]
    Transport(String),

    #[error("No food items found for '{0}'")]
    NoResults(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for NutritionError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key
        let err = err.without_url();
        if err.is_timeout() {
            NutritionError::Transport(format!("request timed out: {}", err))
        } else {
            NutritionError::Transport(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, NutritionError>;
