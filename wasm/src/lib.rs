//! FitTrack WASM Module
//!
//! Browser bindings for the nutrition and body metric calculations the
//! backend also uses, so client-side previews match server results.

use fittrack_shared::health_metrics;
use wasm_bindgen::prelude::*;

/// Calculate BMI from weight (kg) and height (cm)
#[wasm_bindgen]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    health_metrics::calculate_bmi(weight_kg, height_cm)
}

/// Calorie share of each macro as `[protein, carbs, fat]` percentages
#[wasm_bindgen]
pub fn macro_percentages(protein_g: f64, carbs_g: f64, fat_g: f64) -> Vec<f64> {
    let split = health_metrics::macro_calorie_split(protein_g, carbs_g, fat_g);
    vec![split.protein_percent, split.carbs_percent, split.fat_percent]
}

/// Scale a per-100g nutrient value to a serving size in grams
#[wasm_bindgen]
pub fn scale_nutrient(per_100g: f64, serving_grams: f64) -> f64 {
    health_metrics::scale_per_100g(per_100g, serving_grams)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi() {
        let bmi = calculate_bmi(70.0, 175.0);
        assert!((bmi - 22.86).abs() < 0.1);
    }

    #[test]
    fn test_macro_percentages_order() {
        // 25g protein, 0 carbs, 0 fat: everything is protein
        let split = macro_percentages(25.0, 0.0, 0.0);
        assert_eq!(split.len(), 3);
        assert!((split[0] - 100.0).abs() < 1e-9);
        assert_eq!(split[1], 0.0);
        assert_eq!(split[2], 0.0);
    }

    #[test]
    fn test_scale_nutrient() {
        assert!((scale_nutrient(200.0, 50.0) - 100.0).abs() < 1e-9);
    }
}
