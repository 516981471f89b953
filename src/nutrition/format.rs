//! Text reports returned to the MCP client

use crate::types::{FoodSummary, NutritionRecord};
use std::fmt::Write;

const PROTEIN_KCAL_PER_G: f64 = 4.0;
const CARBS_KCAL_PER_G: f64 = 4.0;
const FAT_KCAL_PER_G: f64 = 9.0;

/// Characters of the first hit's description quoted in the next-step hint
const HINT_DESCRIPTION_CHARS: usize = 40;

pub fn format_nutrition(record: &NutritionRecord) -> String {
    let mut output = format!("🥗 **{}** ({})\n", record.name, record.serving_label);

    if !record.portion_note.is_empty() {
        let _ = writeln!(output, "*{}*", record.portion_note);
    }

    output.push_str("\n**Macronutrients:**\n");
    let _ = writeln!(output, "• Calories: {} kcal", round_whole(record.calories_kcal));
    let _ = writeln!(output, "• Protein: {:.1}g", record.protein_g);
    let _ = writeln!(output, "• Carbohydrates: {:.1}g", record.carbs_g);
    let _ = writeln!(output, "• Fat: {:.1}g", record.fat_g);

    if record.fiber_g > 0.0 {
        let _ = writeln!(output, "• Fiber: {:.1}g", record.fiber_g);
    }

    if record.sugar_g > 0.0 {
        let _ = writeln!(output, "• Sugar: {:.1}g", record.sugar_g);
    }

    let protein_kcal = record.protein_g * PROTEIN_KCAL_PER_G;
    let carbs_kcal = record.carbs_g * CARBS_KCAL_PER_G;
    let fat_kcal = record.fat_g * FAT_KCAL_PER_G;
    let total_macro_kcal = protein_kcal + carbs_kcal + fat_kcal;

    if total_macro_kcal > 0.0 {
        let percent = |kcal: f64| round_whole(kcal / total_macro_kcal * 100.0);

        output.push_str("\n**Macro Distribution:**\n");
        let _ = writeln!(output, "• Protein: {}%", percent(protein_kcal));
        let _ = writeln!(output, "• Carbs: {}%", percent(carbs_kcal));
        let _ = writeln!(output, "• Fat: {}%", percent(fat_kcal));
    }

    output
}

pub fn format_search_results(results: &[FoodSummary], query: &str) -> String {
    let mut output = format!("🔍 **Search Results for \"{}\"**\n\n", query);
    let _ = writeln!(output, "Found {} food items:\n", results.len());

    for (i, item) in results.iter().enumerate() {
        let _ = writeln!(output, "**{}. {}**", i + 1, item.description);
        let _ = writeln!(output, "   • ID: {}", item.fdc_id);
        let _ = writeln!(output, "   • Data Type: {}", item.data_type);
        if let Some(brand) = item.brand_owner.as_deref().filter(|b| !b.is_empty()) {
            let _ = writeln!(output, "   • Brand: {}", brand);
        }
        output.push('\n');
    }

    output.push_str("\n💡 **Next Steps:**\n");
    output.push_str(
        "Use the `get_nutrition_by_id` tool with one of the FDC IDs above to get detailed nutrition information.\n",
    );

    if let Some(first) = results.first() {
        let snippet: String = first.description.chars().take(HINT_DESCRIPTION_CHARS).collect();
        let _ = write!(
            output,
            "Example: Get nutrition for ID {} ({}...)",
            first.fdc_id, snippet
        );
    }

    output
}

/// Nearest integer, ties to even (88.5 -> 88, 87.5 -> 88)
fn round_whole(value: f64) -> i64 {
    value.round_ties_even() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataType;

    fn record() -> NutritionRecord {
        NutritionRecord {
            name: "Bananas, raw".to_string(),
            calories_kcal: 105.02,
            protein_g: 1.2862,
            carbs_g: 26.904,
            fat_g: 0.3894,
            fiber_g: 3.068,
            sugar_g: 14.396,
            serving_label: "1 medium".to_string(),
            portion_note: "USDA portion: 1 medium = 118g".to_string(),
        }
    }

    #[test]
    fn test_format_nutrition_full_report() {
        let text = format_nutrition(&record());

        let expected = "🥗 **Bananas, raw** (1 medium)\n\
                        *USDA portion: 1 medium = 118g*\n\
                        \n\
                        **Macronutrients:**\n\
                        • Calories: 105 kcal\n\
                        • Protein: 1.3g\n\
                        • Carbohydrates: 26.9g\n\
                        • Fat: 0.4g\n\
                        • Fiber: 3.1g\n\
                        • Sugar: 14.4g\n\
                        \n\
                        **Macro Distribution:**\n\
                        • Protein: 4%\n\
                        • Carbs: 93%\n\
                        • Fat: 3%\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_zero_fiber_and_sugar_are_hidden() {
        let mut rec = record();
        rec.fiber_g = 0.0;
        rec.sugar_g = 0.0;
        let text = format_nutrition(&rec);
        assert!(!text.contains("Fiber"));
        assert!(!text.contains("Sugar"));
    }

    #[test]
    fn test_tiny_fiber_is_still_shown() {
        let mut rec = record();
        rec.fiber_g = 0.01;
        assert!(format_nutrition(&rec).contains("• Fiber: 0.0g"));
    }

    #[test]
    fn test_macro_distribution_hidden_without_macros() {
        let rec = NutritionRecord {
            name: "Water".to_string(),
            serving_label: "100g".to_string(),
            ..Default::default()
        };
        let text = format_nutrition(&rec);
        assert!(!text.contains("Macro Distribution"));
        assert!(text.contains("• Calories: 0 kcal"));
    }

    #[test]
    fn test_macro_distribution_with_fat_only() {
        let rec = NutritionRecord {
            name: "Olive oil".to_string(),
            fat_g: 14.0,
            serving_label: "1 tbsp".to_string(),
            ..Default::default()
        };
        let text = format_nutrition(&rec);
        assert!(text.contains("• Protein: 0%"));
        assert!(text.contains("• Fat: 100%"));
    }

    #[test]
    fn test_half_values_round_to_even() {
        let rec = NutritionRecord {
            name: "Plums, raw".to_string(),
            calories_kcal: 88.5,
            protein_g: 1.0,
            carbs_g: 7.0,
            serving_label: "150g".to_string(),
            ..Default::default()
        };
        let text = format_nutrition(&rec);
        assert!(text.contains("• Calories: 88 kcal\n"));
        assert!(text.contains("• Protein: 12%\n"));
        assert!(text.contains("• Carbs: 88%\n"));
        assert!(text.contains("• Fat: 0%\n"));
    }

    #[test]
    fn test_empty_portion_note_is_skipped() {
        let mut rec = record();
        rec.portion_note.clear();
        let text = format_nutrition(&rec);
        assert!(text.starts_with("🥗 **Bananas, raw** (1 medium)\n\n**Macronutrients:**"));
    }

    #[test]
    fn test_format_search_results() {
        let results = vec![
            FoodSummary {
                fdc_id: 1105314,
                description: "Bananas, ripe and slightly ripe, raw".to_string(),
                data_type: DataType::Foundation,
                brand_owner: None,
                ingredients: None,
            },
            FoodSummary {
                fdc_id: 2003586,
                description: "BANANA CHIPS".to_string(),
                data_type: DataType::Branded,
                brand_owner: Some("Snack Co".to_string()),
                ingredients: Some("BANANAS, COCONUT OIL".to_string()),
            },
        ];

        let text = format_search_results(&results, "banana");

        assert!(text.starts_with("🔍 **Search Results for \"banana\"**\n\nFound 2 food items:\n\n"));
        assert!(text.contains("**1. Bananas, ripe and slightly ripe, raw**\n   • ID: 1105314\n   • Data Type: Foundation\n\n"));
        assert!(text.contains("**2. BANANA CHIPS**\n   • ID: 2003586\n   • Data Type: Branded\n   • Brand: Snack Co\n"));
        assert!(text.contains("`get_nutrition_by_id`"));
        assert!(text.ends_with(
            "Example: Get nutrition for ID 1105314 (Bananas, ripe and slightly ripe, raw...)"
        ));
    }

    #[test]
    fn test_hint_truncates_long_descriptions_on_char_boundaries() {
        let results = vec![FoodSummary {
            fdc_id: 7,
            description: "é".repeat(50),
            data_type: DataType::SrLegacy,
            brand_owner: None,
            ingredients: None,
        }];

        let text = format_search_results(&results, "e");
        let expected = format!("Example: Get nutrition for ID 7 ({}...)", "é".repeat(40));
        assert!(text.ends_with(&expected));
        assert!(text.contains("• Data Type: SR Legacy"));
    }

    #[test]
    fn test_empty_results_have_no_example() {
        let text = format_search_results(&[], "nothing");
        assert!(text.contains("Found 0 food items"));
        assert!(!text.contains("Example:"));
    }
}
