//! Input validation functions
//!
//! Hand-written checks for values that arrive through the API. Request types
//! in [`crate::types`] additionally derive `validator::Validate` for simple
//! length and range constraints.

use crate::metabolic::{ActivityLevel, Gender, Goal};
use crate::models::MealType;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    let well_formed = regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .map(|re| re.is_match(email))
        .unwrap_or(false);
    if !well_formed {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate a display name
pub fn validate_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if trimmed.chars().count() > 100 {
        return Err("Name must be at most 100 characters".to_string());
    }
    Ok(())
}

/// Validate age in whole years
pub fn validate_age(age: i32) -> Result<(), String> {
    if age < 1 {
        return Err("Age must be at least 1 year".to_string());
    }
    if age > 150 {
        return Err("Age cannot exceed 150 years".to_string());
    }
    Ok(())
}

/// Validate weight value (in kg)
/// Valid range: 0.01-500 kg; weights are stored to two decimals
pub fn validate_weight_kg(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg <= 0.0 {
        return Err("Weight must be greater than zero".to_string());
    }
    if weight_kg < 0.01 {
        return Err("Weight must be at least 0.01 kg".to_string());
    }
    if weight_kg > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
/// Valid range: 50-300 cm
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm < 50.0 {
        return Err("Height must be at least 50 cm".to_string());
    }
    if height_cm > 300.0 {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Validate the calories of a logged meal; a meal must carry some energy
pub fn validate_meal_calories(calories: f64) -> Result<(), String> {
    if calories.is_nan() || calories.is_infinite() {
        return Err("Calories must be a valid number".to_string());
    }
    if calories <= 0.0 {
        return Err("Calories must be greater than zero".to_string());
    }
    if calories > 50000.0 {
        return Err("Calorie value unreasonably high".to_string());
    }
    Ok(())
}

/// Validate grams of a single macronutrient
pub fn validate_macro_grams(grams: f64) -> Result<(), String> {
    if grams.is_nan() || grams.is_infinite() {
        return Err("Macro grams must be a valid number".to_string());
    }
    if grams < 0.0 {
        return Err("Macro grams cannot be negative".to_string());
    }
    if grams > 5000.0 {
        return Err("Macro grams unreasonably high".to_string());
    }
    Ok(())
}

// ============================================================================
// Enumerated labels
// ============================================================================

pub fn parse_gender(value: &str) -> Result<Gender, String> {
    value.parse().map_err(|_| {
        format!(
            "Invalid gender. Must be one of: {}",
            join_labels(Gender::ALL.iter().map(Gender::as_str))
        )
    })
}

pub fn parse_activity_level(value: &str) -> Result<ActivityLevel, String> {
    value.parse().map_err(|_| {
        format!(
            "Invalid activity level. Must be one of: {}",
            join_labels(ActivityLevel::ALL.iter().map(ActivityLevel::as_str))
        )
    })
}

pub fn parse_goal(value: &str) -> Result<Goal, String> {
    value.parse().map_err(|_| {
        format!(
            "Invalid goal. Must be one of: {}",
            join_labels(Goal::ALL.iter().map(Goal::as_str))
        )
    })
}

pub fn parse_meal_type(value: &str) -> Result<MealType, String> {
    value.parse().map_err(|_| {
        format!(
            "Invalid meal type. Must be one of: {}",
            join_labels(MealType::ALL.iter().map(MealType::as_str))
        )
    })
}

fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "name" => "Name",
        "age" => "Age",
        "gender" => "Gender",
        "height" | "height_cm" => "Height",
        "weight" | "weight_kg" => "Current Weight",
        "activity_level" => "Activity Level",
        "goal" => "Goal",
        "meal_type" => "Meal Type",
        "calories" => "Calories",
        _ => field_name,
    }
}

/// Convert a list of technical field names to user-friendly labels
pub fn get_missing_fields_labels(fields: &[&str]) -> Vec<String> {
    fields
        .iter()
        .map(|f| get_field_display_label(f).to_string())
        .collect()
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

/// Attach a field name to a bare validation message
pub fn on_field<T>(field: &str, result: Result<T, String>) -> Result<T, ValidationError> {
    result.map_err(|message| ValidationError::new(field, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("user.name@domain.co.uk").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@dot").is_err());
        assert!(validate_email("spaces in@email.com").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"a".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Sam").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_age() {
        assert!(validate_age(32).is_ok());
        assert!(validate_age(0).is_err());
        assert!(validate_age(-4).is_err());
        assert!(validate_age(151).is_err());
    }

    #[test]
    fn test_validate_meal_calories() {
        assert!(validate_meal_calories(450.0).is_ok());
        assert!(validate_meal_calories(0.0).is_err());
        assert!(validate_meal_calories(-10.0).is_err());
        assert!(validate_meal_calories(f64::NAN).is_err());
        assert!(validate_meal_calories(60000.0).is_err());
    }

    #[test]
    fn test_validate_macro_grams() {
        assert!(validate_macro_grams(0.0).is_ok());
        assert!(validate_macro_grams(-1.0).is_err());
    }

    #[test]
    fn test_parse_enumerations() {
        assert_eq!(parse_gender("Female"), Ok(Gender::Female));
        assert_eq!(parse_goal("lean_bulk"), Ok(Goal::LeanBulk));
        assert_eq!(parse_meal_type("snack"), Ok(MealType::Snack));
        assert_eq!(parse_activity_level("very_active"), Ok(ActivityLevel::VeryActive));

        let err = parse_activity_level("extreme").unwrap_err();
        assert!(err.contains("sedentary, light, moderate, active, very_active"));
        assert!(parse_goal("shred").is_err());
        assert!(parse_meal_type("brunch").is_err());
    }

    #[test]
    fn test_field_display_labels() {
        assert_eq!(get_field_display_label("weight"), "Current Weight");
        assert_eq!(get_field_display_label("height_cm"), "Height");
        assert_eq!(get_field_display_label("unknown_field"), "unknown_field");
        assert_eq!(
            get_missing_fields_labels(&["age", "activity_level"]),
            vec!["Age".to_string(), "Activity Level".to_string()]
        );
    }

    #[test]
    fn test_validation_error() {
        let err = on_field("height_cm", validate_height_cm(20.0)).unwrap_err();
        assert_eq!(err.field, "height_cm");
        assert_eq!(err.user_message(), "Height: Height must be at least 50 cm");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_valid_weight_range(weight in 0.1f64..=500.0) {
            prop_assert!(validate_weight_kg(weight).is_ok());
        }

        #[test]
        fn prop_invalid_weight_not_positive(weight in -100.0f64..=0.0) {
            prop_assert!(validate_weight_kg(weight).is_err());
        }

        #[test]
        fn prop_weight_below_storage_precision_rejected(weight in 0.0001f64..0.01) {
            prop_assert_eq!(
                validate_weight_kg(weight),
                Err("Weight must be at least 0.01 kg".to_string())
            );
        }

        #[test]
        fn prop_valid_height_range(height in 50.0f64..=300.0) {
            prop_assert!(validate_height_cm(height).is_ok());
        }

        #[test]
        fn prop_invalid_height_above_max(height in 300.1f64..500.0) {
            prop_assert!(validate_height_cm(height).is_err());
        }
    }
}
