//! Configuration system for nutrimcp
//!
//! Settings are resolved from 3 tiers:
//! 1. Environment (highest priority, the only source for the API key)
//! 2. User config file
//! 3. Built-in defaults (lowest priority)

mod defaults;
mod loader;
mod settings;
mod user_config;

pub use defaults::*;
pub use loader::ConfigLoader;
pub use settings::UsdaConfig;
pub use user_config::{UsdaSection, UserConfig};
