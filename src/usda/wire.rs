//! FoodData Central request/response shapes
//!
//! Only the fields we read are declared; optional upstream fields are
//! defaulted here so the rest of the crate sees plain domain records.

use crate::types::{DataType, FoodDetail, FoodSummary, NutrientSample, PortionRecord};
use serde::{Deserialize, Serialize};

/// Weight assumed for a portion the upstream lists without one
const DEFAULT_PORTION_GRAMS: f64 = 100.0;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchRequest<'a> {
    pub query: &'a str,
    pub page_size: u32,
    pub data_type: &'a [DataType],
    pub sort_by: &'static str,
    pub sort_order: &'static str,
}

impl<'a> SearchRequest<'a> {
    pub fn new(query: &'a str, page_size: u32, data_type: &'a [DataType]) -> Self {
        Self {
            query,
            page_size,
            data_type,
            sort_by: "dataType.keyword",
            sort_order: "asc",
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub foods: Vec<SearchFood>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchFood {
    pub fdc_id: i64,
    pub description: String,
    pub data_type: DataType,
    #[serde(default)]
    pub brand_owner: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
}

impl From<SearchFood> for FoodSummary {
    fn from(food: SearchFood) -> Self {
        FoodSummary {
            fdc_id: food.fdc_id,
            description: food.description,
            data_type: food.data_type,
            brand_owner: food.brand_owner,
            ingredients: food.ingredients,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FoodResponse {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub food_nutrients: Vec<FoodNutrient>,
    #[serde(default)]
    pub food_portions: Vec<FoodPortion>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FoodNutrient {
    #[serde(default)]
    pub nutrient: NutrientInfo,
    #[serde(default)]
    pub amount: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct NutrientInfo {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FoodPortion {
    #[serde(default)]
    pub portion_description: Option<String>,
    #[serde(default)]
    pub gram_weight: Option<f64>,
}

impl FoodResponse {
    pub fn into_detail(self, fdc_id: i64) -> FoodDetail {
        let nutrients = self
            .food_nutrients
            .into_iter()
            .map(|n| NutrientSample {
                name: n.nutrient.name.unwrap_or_default(),
                amount_per_100g: n.amount.unwrap_or(0.0),
            })
            .collect();

        let portions = self
            .food_portions
            .into_iter()
            .map(|p| PortionRecord {
                description: p.portion_description.unwrap_or_default(),
                gram_weight: p.gram_weight.unwrap_or(DEFAULT_PORTION_GRAMS),
            })
            .collect();

        FoodDetail {
            description: self
                .description
                .unwrap_or_else(|| format!("Food Item {}", fdc_id)),
            nutrients,
            portions,
        }
    }
}
