//! MCP tools implementation
//!
//! Defines the nutrition tools and routes calls to a [`FoodSource`]

use crate::config::{clamp_search_limit, DEFAULT_AMOUNT, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
use crate::mcp::protocol::{CallToolResult, Tool};
use crate::nutrition::{format_nutrition, format_search_results};
use crate::types::{NutritionError, Result};
use crate::usda::FoodSource;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

pub const SEARCH_FOOD_ITEMS: &str = "search_food_items";
pub const GET_NUTRITION_BY_ID: &str = "get_nutrition_by_id";
pub const SEARCH_NUTRITION: &str = "search_nutrition";

/// Get all tool definitions
pub fn get_tool_definitions() -> Vec<Tool> {
    vec![
        Tool {
            name: SEARCH_FOOD_ITEMS.to_string(),
            description: "ALWAYS use this first to search for food items by name. Returns multiple options to choose from since ingredient names vary widely (e.g., 'firm tofu' vs 'soft tofu')".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The food item to search for (e.g., 'tofu', 'chicken', 'apple')"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of results to return (default: 10, max: 20)",
                        "default": DEFAULT_SEARCH_LIMIT,
                        "minimum": 1,
                        "maximum": MAX_SEARCH_LIMIT
                    }
                },
                "required": ["query"]
            }),
        },
        Tool {
            name: GET_NUTRITION_BY_ID.to_string(),
            description: "Get detailed nutrition information for a specific food item using its ID from search results".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "fdcId": {
                        "type": "integer",
                        "description": "The FDC ID of the food item from search results"
                    },
                    "amount": {
                        "type": "string",
                        "description": "Optional: specify amount (e.g., '100g', '1 cup', '1 medium'). Defaults to per 100g",
                        "default": DEFAULT_AMOUNT
                    }
                },
                "required": ["fdcId"]
            }),
        },
        Tool {
            name: SEARCH_NUTRITION.to_string(),
            description: "Quick nutrition lookup using best match. Use search_food_items first for better accuracy when ingredient names might be ambiguous".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "ingredient": {
                        "type": "string",
                        "description": "The ingredient or food item to search for (e.g., 'chicken breast', 'banana', 'olive oil')"
                    },
                    "amount": {
                        "type": "string",
                        "description": "Optional: specify amount (e.g., '100g', '1 cup', '1 medium'). Defaults to per 100g",
                        "default": DEFAULT_AMOUNT
                    }
                },
                "required": ["ingredient"]
            }),
        },
    ]
}

/// Execute a tool call. Every failure becomes an `Error: ...` text result.
pub async fn call_tool(
    name: &str,
    arguments: Option<Value>,
    source: Arc<dyn FoodSource>,
) -> CallToolResult {
    let args = arguments.unwrap_or_else(|| Value::Object(Default::default()));
    info!("Tool call: {}", name);

    let outcome = match name {
        SEARCH_FOOD_ITEMS => handle_search_food_items(args, source.as_ref()).await,
        GET_NUTRITION_BY_ID => handle_get_nutrition_by_id(args, source.as_ref()).await,
        SEARCH_NUTRITION => handle_search_nutrition(args, source.as_ref()).await,
        _ => Err(NutritionError::UnknownTool(name.to_string())),
    };

    match outcome {
        Ok(text) => CallToolResult::text(text),
        Err(e) => {
            error!("{} error: {}", name, e);
            CallToolResult::error(format!("Error: {}", e))
        }
    }
}

fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T> {
    serde_json::from_value(args).map_err(|e| NutritionError::InvalidArguments(e.to_string()))
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(NutritionError::InvalidArguments(format!(
            "'{}' must not be empty",
            field
        )));
    }
    Ok(())
}

fn default_amount() -> String {
    DEFAULT_AMOUNT.to_string()
}

#[derive(Debug, Deserialize)]
struct SearchFoodItemsArgs {
    query: String,
    #[serde(default)]
    limit: Option<f64>,
}

async fn handle_search_food_items(args: Value, source: &dyn FoodSource) -> Result<String> {
    let args: SearchFoodItemsArgs = parse_args(args)?;
    require_non_empty("query", &args.query)?;

    let limit = args
        .limit
        .map(|l| clamp_search_limit(l.round() as i64))
        .unwrap_or(DEFAULT_SEARCH_LIMIT);

    let results = source.search_foods(&args.query, limit).await?;
    Ok(format_search_results(&results, &args.query))
}

#[derive(Debug, Deserialize)]
struct GetNutritionByIdArgs {
    #[serde(rename = "fdcId")]
    fdc_id: i64,
    #[serde(default = "default_amount")]
    amount: String,
}

async fn handle_get_nutrition_by_id(args: Value, source: &dyn FoodSource) -> Result<String> {
    let args: GetNutritionByIdArgs = parse_args(args)?;

    let record = source.get_nutrition_by_id(args.fdc_id, &args.amount).await?;
    Ok(format_nutrition(&record))
}

#[derive(Debug, Deserialize)]
struct SearchNutritionArgs {
    ingredient: String,
    #[serde(default = "default_amount")]
    amount: String,
}

async fn handle_search_nutrition(args: Value, source: &dyn FoodSource) -> Result<String> {
    let args: SearchNutritionArgs = parse_args(args)?;
    require_non_empty("ingredient", &args.ingredient)?;

    let record = source.search_best_match(&args.ingredient, &args.amount).await?;
    Ok(format_nutrition(&record))
}
