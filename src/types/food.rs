//! Domain records for food search and nutrition lookups

use serde::{Deserialize, Serialize};
use std::fmt;

/// FoodData Central data set a food record belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataType {
    Foundation,
    SrLegacy,
    Survey,
    Branded,
    /// Any label the upstream introduces that we don't track yet
    Other(String),
}

impl DataType {
    /// Data sets queried by default, in the upstream's spelling
    pub const SEARCHABLE: [DataType; 4] = [
        DataType::Foundation,
        DataType::SrLegacy,
        DataType::Survey,
        DataType::Branded,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            DataType::Foundation => "Foundation",
            DataType::SrLegacy => "SR Legacy",
            DataType::Survey => "Survey (FNDDS)",
            DataType::Branded => "Branded",
            DataType::Other(label) => label,
        }
    }
}

impl From<String> for DataType {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Foundation" => DataType::Foundation,
            "SR Legacy" => DataType::SrLegacy,
            "Survey (FNDDS)" => DataType::Survey,
            "Branded" => DataType::Branded,
            _ => DataType::Other(label),
        }
    }
}

impl From<DataType> for String {
    fn from(data_type: DataType) -> Self {
        data_type.as_str().to_string()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One search hit
#[derive(Debug, Clone, PartialEq)]
pub struct FoodSummary {
    /// FDC ID, the argument for a follow-up detail lookup
    pub fdc_id: i64,
    pub description: String,
    pub data_type: DataType,
    pub brand_owner: Option<String>,
    pub ingredients: Option<String>,
}

/// Upstream serving-size to gram-weight mapping for a single food
#[derive(Debug, Clone, PartialEq)]
pub struct PortionRecord {
    pub description: String,
    pub gram_weight: f64,
}

impl PortionRecord {
    pub fn new(description: impl Into<String>, gram_weight: f64) -> Self {
        Self {
            description: description.into(),
            gram_weight,
        }
    }
}

/// A nutrient row, expressed per 100g of the food
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientSample {
    pub name: String,
    pub amount_per_100g: f64,
}

impl NutrientSample {
    pub fn new(name: impl Into<String>, amount_per_100g: f64) -> Self {
        Self {
            name: name.into(),
            amount_per_100g,
        }
    }
}

/// Everything a detail lookup needs from a single food record
#[derive(Debug, Clone, PartialEq)]
pub struct FoodDetail {
    pub description: String,
    pub nutrients: Vec<NutrientSample>,
    pub portions: Vec<PortionRecord>,
}

/// Scale factor from the per-100g baseline to the requested serving
#[derive(Debug, Clone, PartialEq)]
pub struct AmountResolution {
    pub multiplier: f64,
    /// How the multiplier was derived, shown to the caller
    pub note: String,
}

/// Nutrient values already scaled to the requested serving
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NutritionRecord {
    pub name: String,
    pub calories_kcal: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
    pub sugar_g: f64,
    /// The amount string exactly as requested
    pub serving_label: String,
    pub portion_note: String,
}
