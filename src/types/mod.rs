//! Shared types for nutrimcp

mod errors;
mod food;

pub use errors::{NutritionError, Result};
pub use food::{
    AmountResolution, DataType, FoodDetail, FoodSummary, NutrientSample, NutritionRecord,
    PortionRecord,
};
