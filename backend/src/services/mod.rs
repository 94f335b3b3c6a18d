//! Business logic services
//!
//! Services validate input, coordinate repositories and the assistant
//! client, and map failures to [`ApiError`](crate::error::ApiError).

pub mod assistant;
pub mod meals;
pub mod profile;
pub mod user;
pub mod weight;

pub use assistant::AssistantService;
pub use meals::MealService;
pub use profile::ProfileService;
pub use user::UserService;
pub use weight::WeightService;
