//! QuickCals Shared Library
//!
//! Calculator, domain types and validation shared by the backend and the
//! WASM module.

pub mod errors;
pub mod metabolic;
pub mod models;
pub mod summary;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use metabolic::*;
pub use models::{ChatRole, MealType};
pub use units::{HeightUnit, WeightUnit};
