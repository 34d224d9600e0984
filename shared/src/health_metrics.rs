//! Health and nutrition math shared by the backend and the browser
//!
//! Everything here is a pure function. Rounding rules match what the API
//! reports: calories are whole numbers, gram amounts keep one decimal.

use serde::{Deserialize, Serialize};

/// Energy per gram of protein (kcal)
pub const PROTEIN_KCAL_PER_GRAM: f64 = 4.0;
/// Energy per gram of carbohydrate (kcal)
pub const CARBS_KCAL_PER_GRAM: f64 = 4.0;
/// Energy per gram of fat (kcal)
pub const FAT_KCAL_PER_GRAM: f64 = 9.0;

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 || !height_cm.is_finite() || !weight_kg.is_finite() {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Scale a per-100g nutrient value to an actual serving
pub fn scale_per_100g(per_100g: f64, serving_grams: f64) -> f64 {
    per_100g * serving_grams / 100.0
}

/// Round a calorie amount to a whole number
pub fn round_calories(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    value.round() as i64
}

/// Round to one decimal place
pub fn round_to_tenth(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 10.0).round() / 10.0
}

/// Share of macro calories contributed by protein, carbs and fat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MacroSplit {
    pub protein_percent: f64,
    pub carbs_percent: f64,
    pub fat_percent: f64,
}

/// Split macro grams into calorie percentages
///
/// Protein and carbs count 4 kcal/g, fat 9 kcal/g. When the macros carry no
/// calories at all every share is zero.
pub fn macro_calorie_split(protein_g: f64, carbs_g: f64, fat_g: f64) -> MacroSplit {
    let protein_kcal = protein_g.max(0.0) * PROTEIN_KCAL_PER_GRAM;
    let carbs_kcal = carbs_g.max(0.0) * CARBS_KCAL_PER_GRAM;
    let fat_kcal = fat_g.max(0.0) * FAT_KCAL_PER_GRAM;
    let total = protein_kcal + carbs_kcal + fat_kcal;

    if total <= 0.0 || !total.is_finite() {
        return MacroSplit::default();
    }

    MacroSplit {
        protein_percent: protein_kcal / total * 100.0,
        carbs_percent: carbs_kcal / total * 100.0,
        fat_percent: fat_kcal / total * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_bmi() {
        let bmi = calculate_bmi(70.0, 175.0);
        assert!((bmi - 22.86).abs() < 0.01);
    }

    #[test]
    fn test_bmi_zero_height() {
        assert_eq!(calculate_bmi(70.0, 0.0), 0.0);
    }

    #[rstest]
    #[case(200.0, 100.0, 200.0)]
    #[case(200.0, 50.0, 100.0)]
    #[case(52.0, 150.0, 78.0)]
    #[case(0.0, 250.0, 0.0)]
    fn test_scale_per_100g(#[case] per_100g: f64, #[case] grams: f64, #[case] expected: f64) {
        assert!((scale_per_100g(per_100g, grams) - expected).abs() < 1e-9);
    }

    #[rstest]
    #[case(199.5, 200)]
    #[case(199.49, 199)]
    #[case(0.0, 0)]
    fn test_round_calories(#[case] input: f64, #[case] expected: i64) {
        assert_eq!(round_calories(input), expected);
    }

    #[rstest]
    #[case(12.34, 12.3)]
    #[case(12.35, 12.4)]
    #[case(7.0, 7.0)]
    fn test_round_to_tenth(#[case] input: f64, #[case] expected: f64) {
        assert!((round_to_tenth(input) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_round_non_finite_is_zero() {
        assert_eq!(round_calories(f64::NAN), 0);
        assert_eq!(round_to_tenth(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_macro_split_weights_fat_at_nine() {
        // 10g each: 40 + 40 + 90 = 170 kcal
        let split = macro_calorie_split(10.0, 10.0, 10.0);
        assert!((split.protein_percent - 40.0 / 170.0 * 100.0).abs() < 1e-9);
        assert!((split.fat_percent - 90.0 / 170.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_macro_split_empty_is_zero() {
        assert_eq!(macro_calorie_split(0.0, 0.0, 0.0), MacroSplit::default());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Non-empty macro splits always add up to 100%
        #[test]
        fn prop_macro_split_sums_to_hundred(
            protein in 0.1f64..500.0,
            carbs in 0.0f64..500.0,
            fat in 0.0f64..500.0
        ) {
            let split = macro_calorie_split(protein, carbs, fat);
            let sum = split.protein_percent + split.carbs_percent + split.fat_percent;
            prop_assert!((sum - 100.0).abs() < 1e-6, "sum was {}", sum);
        }

        /// Rounding to a tenth never moves a value by more than 0.05
        #[test]
        fn prop_round_to_tenth_is_close(value in -10_000.0f64..10_000.0) {
            prop_assert!((round_to_tenth(value) - value).abs() <= 0.05 + 1e-9);
        }
    }
}
