//! Nutrition math and presentation
//!
//! Everything here is pure: no I/O, no shared state.

pub mod amount;
pub mod extract;
pub mod format;

pub use amount::resolve;
pub use extract::{extract_nutrition, NutrientKind};
pub use format::{format_nutrition, format_search_results};
