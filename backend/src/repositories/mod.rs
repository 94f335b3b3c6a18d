//! Database repositories
//!
//! Provides data access layer for database operations. Quantities are stored
//! as NUMERIC and converted at this boundary.

pub mod chat;
pub mod meals;
pub mod user;
pub mod weight;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

pub use chat::{ChatMessageRecord, ChatRepository};
pub use meals::{CreateMeal, MealRecord, MealRepository, UpdateMeal};
pub use user::{ProfileRecord, ProfileRepository, UpdateProfile, UserRecord, UserRepository};
pub use weight::{CreateWeightLog, WeightLogRecord, WeightRepository};

/// Convert to a two-decimal NUMERIC value
pub(crate) fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default().round_dp(2)
}

/// Convert a stored NUMERIC value back to f64
pub(crate) fn decimal_to_f64(value: &Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
