//! USDA FoodData Central lookups

mod client;
mod wire;

pub use client::UsdaClient;

use crate::nutrition::{extract_nutrition, resolve};
use crate::types::{FoodDetail, FoodSummary, NutritionError, NutritionRecord, Result};
use async_trait::async_trait;
use tracing::debug;

/// Source of food records. Implemented by [`UsdaClient`]; tool handlers only
/// see this trait.
#[async_trait]
pub trait FoodSource: Send + Sync {
    /// Search foods by name. Never returns an empty list: zero hits is
    /// [`NutritionError::NoResults`].
    async fn search_foods(&self, query: &str, limit: u32) -> Result<Vec<FoodSummary>>;

    async fn get_food_detail(&self, fdc_id: i64) -> Result<FoodDetail>;

    /// Nutrition for one food, scaled to `amount`
    async fn get_nutrition_by_id(&self, fdc_id: i64, amount: &str) -> Result<NutritionRecord> {
        let detail = self.get_food_detail(fdc_id).await?;
        let resolution = resolve(amount, &detail.portions);
        debug!(
            "Food {} amount '{}' -> x{} ({})",
            fdc_id, amount, resolution.multiplier, resolution.note
        );

        Ok(extract_nutrition(
            &detail.description,
            &detail.nutrients,
            resolution.multiplier,
            amount,
            &resolution.note,
        ))
    }

    /// Nutrition for the top search hit
    async fn search_best_match(&self, query: &str, amount: &str) -> Result<NutritionRecord> {
        let results = self.search_foods(query, 1).await?;
        let best = results
            .first()
            .ok_or_else(|| NutritionError::NoResults(query.to_string()))?;

        debug!("Best match for '{}': {} ({})", query, best.description, best.fdc_id);
        self.get_nutrition_by_id(best.fdc_id, amount).await
    }
}
