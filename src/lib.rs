//! nutrimcp - USDA nutrition lookups for Model Context Protocol
//!
//! This crate lets MCP clients (like Claude Desktop) search the USDA
//! FoodData Central database and get nutrient values scaled to a serving
//! size described in plain words ("1 cup", "2 medium", "150g").

pub mod config;
pub mod desktop;
pub mod mcp;
pub mod nutrition;
pub mod types;
pub mod usda;

pub use config::{ConfigLoader, UsdaConfig};
pub use mcp::McpServer;
pub use types::NutritionError;
pub use usda::{FoodSource, UsdaClient};
