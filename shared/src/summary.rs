//! Summaries derived from logged data
//!
//! Pure functions over slices of logs; the backend loads the rows and
//! hands them here so that the arithmetic stays testable without a database.

use crate::metabolic::{MacroTargets, MetabolicResult, ProfileSnapshot};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Weight
// ============================================================================

/// A single weight reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightPoint {
    pub weight_kg: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Change in body weight between the first and last reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTrend {
    pub start_weight: f64,
    pub current_weight: f64,
    pub total_change: f64,
    /// Whole days between the readings, at least 1
    pub days: i64,
    /// Average change per week over the period
    pub weekly_rate: f64,
    pub entries: usize,
}

/// Trend over the given readings, in any order
///
/// Returns `None` with fewer than two readings.
pub fn weight_trend(points: &[WeightPoint]) -> Option<WeightTrend> {
    if points.len() < 2 {
        return None;
    }

    let mut sorted = points.to_vec();
    sorted.sort_by_key(|p| p.recorded_at);

    let first = sorted.first()?;
    let last = sorted.last()?;

    let total_change = last.weight_kg - first.weight_kg;
    let elapsed_days = (last.recorded_at - first.recorded_at).num_seconds() as f64 / 86_400.0;
    let days = (elapsed_days.round() as i64).max(1);

    Some(WeightTrend {
        start_weight: first.weight_kg,
        current_weight: last.weight_kg,
        total_change,
        days,
        weekly_rate: total_change / days as f64 * 7.0,
        entries: sorted.len(),
    })
}

/// Weight of the most recent reading
pub fn latest_weight(points: &[WeightPoint]) -> Option<f64> {
    points
        .iter()
        .max_by_key(|p| p.recorded_at)
        .map(|p| p.weight_kg)
}

// ============================================================================
// Nutrition
// ============================================================================

/// Energy and macros of one logged meal
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MealNutrition {
    pub calories: f64,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Grams left before reaching each macro target; negative means over target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RemainingMacros {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// What was eaten on one day against the day's targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyNutrition {
    pub date: NaiveDate,
    pub meal_count: usize,
    pub consumed: NutritionTotals,
    pub calorie_target: Option<i32>,
    pub remaining_calories: Option<f64>,
    pub macro_targets: Option<MacroTargets>,
    pub remaining_macros: Option<RemainingMacros>,
}

/// Sum calories and macros; absent macros count as zero
pub fn sum_nutrition(meals: &[MealNutrition]) -> NutritionTotals {
    meals.iter().fold(NutritionTotals::default(), |acc, meal| NutritionTotals {
        calories: acc.calories + meal.calories,
        protein: acc.protein + meal.protein.unwrap_or(0.0),
        carbs: acc.carbs + meal.carbs.unwrap_or(0.0),
        fat: acc.fat + meal.fat.unwrap_or(0.0),
    })
}

/// Summarize a day's meals, comparing against targets when available
pub fn daily_nutrition(
    date: NaiveDate,
    meals: &[MealNutrition],
    targets: Option<&MetabolicResult>,
) -> DailyNutrition {
    let consumed = sum_nutrition(meals);

    DailyNutrition {
        date,
        meal_count: meals.len(),
        consumed,
        calorie_target: targets.map(|t| t.calorie_target),
        remaining_calories: targets.map(|t| t.calorie_target as f64 - consumed.calories),
        macro_targets: targets.map(|t| t.macro_targets),
        remaining_macros: targets.map(|t| RemainingMacros {
            protein: t.macro_targets.protein as f64 - consumed.protein,
            carbs: t.macro_targets.carbs as f64 - consumed.carbs,
            fat: t.macro_targets.fat as f64 - consumed.fat,
        }),
    }
}

// ============================================================================
// Profile completeness
// ============================================================================

/// Fields the profile screen asks the user to fill in before targets work
pub fn missing_profile_fields(profile: &ProfileSnapshot) -> Vec<&'static str> {
    let mut fields = profile.missing_fields().names();
    if profile.activity_level.is_none() {
        fields.push("activity_level");
    }
    fields
}

/// Percentage of onboarding steps completed
///
/// Steps: name, age, gender, height, weight, activity level, goal and at
/// least one weight log.
pub fn setup_percentage(profile: &ProfileSnapshot, has_name: bool, has_weight_log: bool) -> u8 {
    let missing = profile.missing_fields();
    let steps = [
        has_name,
        !missing.age,
        !missing.gender,
        !missing.height,
        !missing.weight,
        profile.activity_level.is_some(),
        profile.goal.is_some(),
        has_weight_log,
    ];
    let done = steps.iter().filter(|s| **s).count();
    ((done * 100) as f64 / steps.len() as f64).round() as u8
}
