//! QuickCals WASM Module
//!
//! Browser bindings for the metabolic calculator so that the profile screen
//! can preview targets before anything is saved.
//!
//! Functions taking a profile accept it as a JSON string with the same keys as
//! [`ProfileSnapshot`]. Calculations that need missing fields return `-1`
//! from numeric functions, or a JSON object `{"error": ..., "missingFields": ...}`
//! from JSON functions.

use quickcals_shared::metabolic::{self, ActivityLevel, CalorieBase, Goal, ProfileSnapshot};
use quickcals_shared::units::{HeightUnit, WeightUnit};
use serde_json::json;
use wasm_bindgen::prelude::*;

fn parse_profile(profile_json: &str) -> Option<ProfileSnapshot> {
    serde_json::from_str(profile_json).ok()
}

/// Basal metabolic rate in kcal/day, or -1 when required fields are missing
#[wasm_bindgen]
pub fn compute_bmr(profile_json: &str) -> i32 {
    parse_profile(profile_json)
        .and_then(|p| metabolic::compute_bmr(&p).ok())
        .unwrap_or(-1)
}

/// Scale a basal rate by an activity level label; unknown labels leave it unchanged
#[wasm_bindgen]
pub fn compute_tdee(bmr: i32, activity_level: &str) -> i32 {
    metabolic::compute_tdee(bmr, activity_level.parse::<ActivityLevel>().ok())
}

/// Goal-adjusted calorie target; unknown labels behave like maintenance
#[wasm_bindgen]
pub fn compute_calorie_target(rate: i32, goal: &str) -> i32 {
    metabolic::compute_calorie_target(rate, goal.parse::<Goal>().ok())
}

/// Full calorie and macro targets as a JSON string
#[wasm_bindgen]
pub fn calculate_targets(profile_json: &str, use_basal_rate: bool) -> String {
    let Some(profile) = parse_profile(profile_json) else {
        return json!({ "error": "Invalid profile JSON" }).to_string();
    };
    let base = if use_basal_rate {
        CalorieBase::BasalRate
    } else {
        CalorieBase::ActivityAdjustedRate
    };

    match metabolic::calculate_targets(&profile, base) {
        Ok(result) => serde_json::to_string(&result).unwrap_or_default(),
        Err(err) => json!({
            "error": err.to_string(),
            "missingFields": err.missing,
        })
        .to_string(),
    }
}

/// Convert a weight in the given unit to kilograms; NaN for unknown units
#[wasm_bindgen]
pub fn weight_to_kg(value: f64, unit: &str) -> f64 {
    unit.parse::<WeightUnit>()
        .map(|u| u.to_kg(value))
        .unwrap_or(f64::NAN)
}

/// Convert a height in the given unit to centimeters; NaN for unknown units
#[wasm_bindgen]
pub fn height_to_cm(value: f64, unit: &str) -> f64 {
    unit.parse::<HeightUnit>()
        .map(|u| u.to_cm(value))
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r#"{
        "age": 32,
        "gender": "male",
        "height_cm": 180.0,
        "weight_kg": 76.0,
        "activity_level": "moderate",
        "goal": "build_muscle"
    }"#;

    #[test]
    fn test_bmr_from_json() {
        assert_eq!(compute_bmr(PROFILE), 1730);
        assert_eq!(compute_bmr(r#"{"age": 32}"#), -1);
        assert_eq!(compute_bmr("not json"), -1);
    }

    #[test]
    fn test_label_based_helpers() {
        assert_eq!(compute_tdee(1730, "moderate"), 2682);
        assert_eq!(compute_tdee(1730, "unknown"), 1730);
        assert_eq!(compute_calorie_target(2000, "lose_weight_fast"), 1500);
        assert_eq!(compute_calorie_target(2000, ""), 2000);
    }

    #[test]
    fn test_targets_json() {
        let value: serde_json::Value = serde_json::from_str(&calculate_targets(PROFILE, false)).unwrap();
        assert_eq!(value["bmr"], 2682);
        // 2682 × 1.15 = 3084.3
        assert_eq!(value["calorieTarget"], 3084);

        let basal: serde_json::Value = serde_json::from_str(&calculate_targets(PROFILE, true)).unwrap();
        assert_eq!(basal["bmr"], 1730);
    }

    #[test]
    fn test_targets_json_reports_missing_fields() {
        let value: serde_json::Value =
            serde_json::from_str(&calculate_targets(r#"{"gender": "female"}"#, false)).unwrap();
        assert_eq!(value["missingFields"]["age"], true);
        assert_eq!(value["missingFields"]["gender"], false);
    }

    #[test]
    fn test_oversized_weight_is_reported_missing() {
        let profile = r#"{"age": 32, "gender": "male", "height_cm": 180.0, "weight_kg": 1.0e30}"#;
        assert_eq!(compute_bmr(profile), -1);

        let value: serde_json::Value = serde_json::from_str(&calculate_targets(profile, false)).unwrap();
        assert_eq!(value["missingFields"]["weight"], true);
        assert_eq!(value["missingFields"]["height"], false);
    }

    #[test]
    fn test_unit_helpers() {
        assert!((weight_to_kg(100.0, "lbs") - 45.359).abs() < 0.001);
        assert!((height_to_cm(1.8, "m") - 180.0).abs() < 1e-9);
        assert!(weight_to_kg(1.0, "grain").is_nan());
    }
}
