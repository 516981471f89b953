//! Nutrient extraction from upstream nutrient rows

use crate::types::{NutrientSample, NutritionRecord};

/// Nutrients reported per serving, keyed by the label searched for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NutrientKind {
    Energy,
    Protein,
    Carbohydrate,
    TotalLipid,
    Fiber,
    Sugars,
}

impl NutrientKind {
    /// Substring matched against upstream nutrient names
    pub fn label(self) -> &'static str {
        match self {
            NutrientKind::Energy => "Energy",
            NutrientKind::Protein => "Protein",
            NutrientKind::Carbohydrate => "Carbohydrate",
            NutrientKind::TotalLipid => "Total lipid",
            NutrientKind::Fiber => "Fiber",
            NutrientKind::Sugars => "Sugars",
        }
    }
}

/// Per-100g amount of the first sample whose name contains the kind's label,
/// compared case-insensitively. Missing nutrients count as 0.
pub fn baseline(samples: &[NutrientSample], kind: NutrientKind) -> f64 {
    let label = kind.label().to_lowercase();
    samples
        .iter()
        .find(|sample| sample.name.to_lowercase().contains(&label))
        .map(|sample| sample.amount_per_100g)
        .unwrap_or(0.0)
}

pub fn extract_nutrition(
    name: &str,
    samples: &[NutrientSample],
    multiplier: f64,
    requested_amount: &str,
    portion_note: &str,
) -> NutritionRecord {
    let scaled = |kind| baseline(samples, kind) * multiplier;

    NutritionRecord {
        name: name.to_string(),
        calories_kcal: scaled(NutrientKind::Energy),
        protein_g: scaled(NutrientKind::Protein),
        carbs_g: scaled(NutrientKind::Carbohydrate),
        fat_g: scaled(NutrientKind::TotalLipid),
        fiber_g: scaled(NutrientKind::Fiber),
        sugar_g: scaled(NutrientKind::Sugars),
        serving_label: requested_amount.to_string(),
        portion_note: portion_note.to_string(),
    }
}
