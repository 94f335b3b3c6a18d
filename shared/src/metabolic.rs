//! Metabolic rate and nutrition target calculations
//!
//! Derives daily energy figures from a [`ProfileSnapshot`]:
//!
//! - basal metabolic rate (Mifflin-St Jeor)
//! - activity-scaled rate / TDEE
//! - goal-conditioned calorie target
//! - protein / fat / carbohydrate gram targets
//!
//! # Arithmetic
//!
//! Every formula is evaluated on [`Decimal`] so that half-way values such as
//! `1730 × 1.55 = 2681.5` round identically on every platform. Rounding is
//! half-up toward positive infinity (`floor(x + 0.5)`), which also fixes the
//! result for negative carbohydrate targets (`-112.5 → -112`).
//!
//! Nothing here performs I/O or keeps state; identical inputs always produce
//! identical outputs.

use crate::errors::MissingFieldsError;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Profile Types
// ============================================================================

/// Gender used to pick the Mifflin-St Jeor constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    /// Uses the midpoint of the male and female equations
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    /// Constant added to `10·weight + 6.25·height − 5·age`
    fn bmr_offset(&self) -> Decimal {
        match self {
            Gender::Male => Decimal::from(5),
            Gender::Female => Decimal::from(-161),
            // (5 + -161) / 2
            Gender::Other => Decimal::from(-78),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" | "non_binary" | "nonbinary" => Ok(Gender::Other),
            _ => Err(format!("Unknown gender: {}", s)),
        }
    }
}

/// Activity level used to scale the basal rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise or a physical job
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    /// Multiplier applied to the basal rate
    pub fn multiplier(&self) -> Decimal {
        match self {
            ActivityLevel::Sedentary => Decimal::new(120, 2),
            ActivityLevel::Light => Decimal::new(1375, 3),
            ActivityLevel::Moderate => Decimal::new(155, 2),
            ActivityLevel::Active => Decimal::new(1725, 3),
            ActivityLevel::VeryActive => Decimal::new(190, 2),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::Light => "Light exercise 1-3 days/week",
            ActivityLevel::Moderate => "Moderate exercise 3-5 days/week",
            ActivityLevel::Active => "Hard exercise 6-7 days/week",
            ActivityLevel::VeryActive => "Very hard exercise or physical job",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "very_active" | "veryactive" => Ok(ActivityLevel::VeryActive),
            _ => Err(format!("Unknown activity level: {}", s)),
        }
    }
}

/// Body-weight goal that conditions the calorie target and protein intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    LoseWeight,
    LoseWeightFast,
    #[default]
    MaintainWeight,
    BodyRecomposition,
    LeanBulk,
    BuildMuscle,
}

impl Goal {
    pub const ALL: [Goal; 6] = [
        Goal::LoseWeight,
        Goal::LoseWeightFast,
        Goal::MaintainWeight,
        Goal::BodyRecomposition,
        Goal::LeanBulk,
        Goal::BuildMuscle,
    ];

    /// Multiplier applied to the rate to obtain the calorie target
    pub fn calorie_multiplier(&self) -> Decimal {
        match self {
            Goal::LoseWeight => Decimal::new(85, 2),
            Goal::LoseWeightFast => Decimal::new(75, 2),
            Goal::BuildMuscle => Decimal::new(115, 2),
            Goal::LeanBulk => Decimal::new(110, 2),
            Goal::MaintainWeight | Goal::BodyRecomposition => Decimal::ONE,
        }
    }

    /// Grams of protein per kilogram of body weight
    pub fn protein_multiplier(&self) -> Decimal {
        match self {
            Goal::BuildMuscle => Decimal::new(20, 1),
            // Higher protein also preserves muscle during an aggressive cut
            Goal::LeanBulk | Goal::LoseWeightFast => Decimal::new(18, 1),
            _ => Decimal::new(16, 1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::LoseWeight => "lose_weight",
            Goal::LoseWeightFast => "lose_weight_fast",
            Goal::MaintainWeight => "maintain_weight",
            Goal::BodyRecomposition => "body_recomposition",
            Goal::LeanBulk => "lean_bulk",
            Goal::BuildMuscle => "build_muscle",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Goal::ALL
            .into_iter()
            .find(|g| g.as_str() == normalized)
            .ok_or_else(|| format!("Unknown goal: {}", s))
    }
}

/// Read-only view of the profile fields the calculator needs
///
/// Every field is optional: the calculator, not the type system, decides
/// what is missing. A field counts as missing when it is absent, zero, or NaN.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    /// Age in years
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    /// Weight in kilograms
    pub weight_kg: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<Goal>,
}

impl ProfileSnapshot {
    /// Which of the fields required for a basal rate are missing
    pub fn missing_fields(&self) -> MissingFields {
        MissingFields {
            age: self.present_age().is_none(),
            gender: self.gender.is_none(),
            height: measurement(self.height_cm).is_none(),
            weight: measurement(self.weight_kg).is_none(),
        }
    }

    fn present_age(&self) -> Option<i32> {
        self.age.filter(|age| *age != 0)
    }
}

/// Map of required fields, `true` marking the ones that are missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MissingFields {
    pub age: bool,
    pub gender: bool,
    pub height: bool,
    pub weight: bool,
}

impl MissingFields {
    pub fn any(&self) -> bool {
        self.age || self.gender || self.height || self.weight
    }

    /// Names of the missing fields, in declaration order
    pub fn names(&self) -> Vec<&'static str> {
        [
            ("age", self.age),
            ("gender", self.gender),
            ("height", self.height),
            ("weight", self.weight),
        ]
        .into_iter()
        .filter_map(|(name, missing)| missing.then_some(name))
        .collect()
    }
}

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().join(", "))
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Which rate the goal multiplier is applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalorieBase {
    /// The unscaled Mifflin-St Jeor value
    BasalRate,
    /// The basal value scaled by the activity multiplier when one is known
    #[default]
    ActivityAdjustedRate,
}

/// Daily macro targets in grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub protein: i32,
    pub fat: i32,
    /// Not clamped: negative when protein and fat exceed the calorie target
    pub carbs: i32,
}

/// Calorie and macro targets derived from a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetabolicResult {
    /// The rate the calorie target was derived from
    pub bmr: i32,
    pub basal_rate: i32,
    pub activity_adjusted_rate: Option<i32>,
    pub calorie_base: CalorieBase,
    pub calorie_target: i32,
    pub macro_targets: MacroTargets,
    pub goal: Goal,
}

/// Basal rate, TDEE and the standard ±500 kcal presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergySummary {
    pub basal_rate: i32,
    pub tdee: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    pub calories_for_loss: i32,
    pub calories_for_maintenance: i32,
    pub calories_for_gain: i32,
}

/// Daily deficit / surplus used for the loss and gain presets
pub const PRESET_ADJUSTMENT_KCAL: i32 = 500;

// ============================================================================
// Operations
// ============================================================================

/// Basal metabolic rate, rounded to whole kcal/day
///
/// male:   10·w + 6.25·h − 5·a + 5
/// female: 10·w + 6.25·h − 5·a − 161
/// other:  midpoint of the two
pub fn compute_bmr(profile: &ProfileSnapshot) -> Result<i32, MissingFieldsError> {
    raw_basal_rate(profile).map(round_half_up)
}

/// Scale a rounded basal rate by the activity multiplier
///
/// Without an activity level the rate is returned unchanged.
pub fn compute_tdee(bmr: i32, activity_level: Option<ActivityLevel>) -> i32 {
    match activity_level {
        Some(level) => round_half_up(Decimal::from(bmr) * level.multiplier()),
        None => bmr,
    }
}

/// Unrounded basal value scaled by the activity multiplier, rounded once
///
/// Differs from `compute_tdee(compute_bmr(p)?, p.activity_level)` by at most
/// one kcal because it rounds a single time.
pub fn activity_adjusted_rate(profile: &ProfileSnapshot) -> Result<i32, MissingFieldsError> {
    let raw = raw_basal_rate(profile)?;
    Ok(round_half_up(scale_by_activity(raw, profile.activity_level)))
}

/// Goal-adjusted daily calorie target
///
/// An absent goal behaves like `maintain_weight`.
pub fn compute_calorie_target(rate: i32, goal: Option<Goal>) -> i32 {
    let multiplier = goal.unwrap_or_default().calorie_multiplier();
    round_half_up(Decimal::from(rate) * multiplier)
}

/// Split a calorie target into protein, fat and carbohydrate grams
///
/// - protein: `weight × multiplier(goal)`, or 0 without a weight
/// - fat: 25% of the target at 9 kcal/g
/// - carbs: the remainder at 4 kcal/g, using the unrounded protein grams
pub fn compute_macro_targets(
    calorie_target: i32,
    weight_kg: Option<f64>,
    goal: Option<Goal>,
) -> MacroTargets {
    let goal = goal.unwrap_or_default();
    let protein_grams = measurement(weight_kg)
        .map(|w| w * goal.protein_multiplier())
        .unwrap_or(Decimal::ZERO);

    let calories = Decimal::from(calorie_target);
    let fat_calories = calories * Decimal::new(25, 2);
    let carb_calories = calories - protein_grams * Decimal::from(4) - fat_calories;

    MacroTargets {
        protein: round_half_up(protein_grams),
        fat: round_half_up(fat_calories / Decimal::from(9)),
        carbs: round_half_up(carb_calories / Decimal::from(4)),
    }
}

/// Full pipeline from profile to targets
pub fn calculate_targets(
    profile: &ProfileSnapshot,
    base: CalorieBase,
) -> Result<MetabolicResult, MissingFieldsError> {
    let raw = raw_basal_rate(profile)?;
    let basal_rate = round_half_up(raw);
    let activity_adjusted_rate = profile
        .activity_level
        .map(|level| round_half_up(raw * level.multiplier()));

    let bmr = match base {
        CalorieBase::BasalRate => basal_rate,
        CalorieBase::ActivityAdjustedRate => activity_adjusted_rate.unwrap_or(basal_rate),
    };

    let calorie_target = compute_calorie_target(bmr, profile.goal);
    let macro_targets = compute_macro_targets(calorie_target, profile.weight_kg, profile.goal);

    Ok(MetabolicResult {
        bmr,
        basal_rate,
        activity_adjusted_rate,
        calorie_base: base,
        calorie_target,
        macro_targets,
        goal: profile.goal.unwrap_or_default(),
    })
}

/// Basal rate and TDEE with loss / maintenance / gain presets
pub fn energy_summary(profile: &ProfileSnapshot) -> Result<EnergySummary, MissingFieldsError> {
    let basal_rate = compute_bmr(profile)?;
    let tdee = compute_tdee(basal_rate, profile.activity_level);

    Ok(EnergySummary {
        basal_rate,
        tdee,
        activity_level: profile.activity_level,
        calories_for_loss: tdee - PRESET_ADJUSTMENT_KCAL,
        calories_for_maintenance: tdee,
        calories_for_gain: tdee + PRESET_ADJUSTMENT_KCAL,
    })
}

// ============================================================================
// Helpers
// ============================================================================

fn raw_basal_rate(profile: &ProfileSnapshot) -> Result<Decimal, MissingFieldsError> {
    let missing = profile.missing_fields();
    let (Some(age), Some(gender), Some(height), Some(weight)) = (
        profile.present_age(),
        profile.gender,
        measurement(profile.height_cm),
        measurement(profile.weight_kg),
    ) else {
        return Err(MissingFieldsError { missing });
    };

    let base = Decimal::TEN * weight + Decimal::new(625, 2) * height
        - Decimal::from(5) * Decimal::from(age);
    Ok(base + gender.bmr_offset())
}

fn scale_by_activity(value: Decimal, activity_level: Option<ActivityLevel>) -> Decimal {
    match activity_level {
        Some(level) => value * level.multiplier(),
        None => value,
    }
}

/// Absent, zero and NaN all count as "not provided"
fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

/// A provided measurement as a `Decimal`
///
/// Values `Decimal` cannot hold, or beyond ±1e9, count as missing. The bound
/// keeps every product in the formulas well inside the `Decimal` range.
fn measurement(value: Option<f64>) -> Option<Decimal> {
    let limit = Decimal::new(1_000_000_000, 0);
    present(value)
        .and_then(Decimal::from_f64)
        .filter(|v| v.abs() <= limit)
}

/// Round half-up toward positive infinity, saturating at the i32 range
pub fn round_half_up(value: Decimal) -> i32 {
    let saturated = if value.is_sign_negative() { i32::MIN } else { i32::MAX };
    value
        .checked_add(Decimal::new(5, 1))
        .and_then(|shifted| shifted.floor().to_i32())
        .unwrap_or(saturated)
}
