//! Serving amount resolution
//!
//! Turns a free-form amount ("1 cup", "2 medium", "150g") into a multiplier
//! over the per-100g baseline. Sources are tried in order of confidence:
//! 1. Upstream portion data for the food
//! 2. An explicit gram amount
//! 3. Estimated grams for common household units
//! 4. A bare number, taken as grams

use crate::types::{AmountResolution, PortionRecord};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static NUMBER_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)").ok());

/// Grams per unit, scanned in order; the first keyword found wins
const UNIT_ESTIMATES: [(&str, f64); 8] = [
    ("cup", 240.0),
    ("medium", 150.0),
    ("large", 200.0),
    ("small", 100.0),
    ("slice", 30.0),
    ("piece", 100.0),
    ("tbsp", 15.0),
    ("tsp", 5.0),
];

/// Resolve `amount` against the food's portions.
///
/// Portion matching is loose: a portion is picked as soon as any of its
/// description tokens occurs anywhere in the amount text.
pub fn resolve(amount: &str, portions: &[PortionRecord]) -> AmountResolution {
    let amount = amount.trim().to_lowercase();

    if let Some(portion) = match_portion(&amount, portions) {
        debug!(
            "Amount '{}' matched portion '{}' ({}g)",
            amount, portion.description, portion.gram_weight
        );
        return AmountResolution {
            multiplier: portion.gram_weight / 100.0,
            note: format!(
                "USDA portion: {} = {}g",
                portion.description, portion.gram_weight
            ),
        };
    }

    let Some(value) = first_number(&amount) else {
        return AmountResolution {
            multiplier: 1.0,
            note: "No amount specified, using 100g".to_string(),
        };
    };

    // Anything with a 'g' outside of "kg" counts as grams
    if amount.contains('g') && !amount.contains("kg") {
        return AmountResolution {
            multiplier: value / 100.0,
            note: format!("{}g", value),
        };
    }

    for (unit, grams_per_unit) in UNIT_ESTIMATES {
        if amount.contains(unit) {
            let total_grams = value * grams_per_unit;
            return AmountResolution {
                multiplier: total_grams / 100.0,
                note: format!("{} {} ≈ {}g (estimate)", value, unit, total_grams),
            };
        }
    }

    AmountResolution {
        multiplier: value / 100.0,
        note: format!("{}g (assumed)", value),
    }
}

fn match_portion<'a>(amount: &str, portions: &'a [PortionRecord]) -> Option<&'a PortionRecord> {
    portions.iter().find(|portion| {
        portion
            .description
            .to_lowercase()
            .split_whitespace()
            .any(|token| amount.contains(token))
    })
}

fn first_number(amount: &str) -> Option<f64> {
    NUMBER_PATTERN
        .as_ref()?
        .captures(amount)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
