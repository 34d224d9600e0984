//! Business logic services
//!
//! Services validate input, call repositories and map records to the
//! response types shared with the frontend.

pub mod analytics;
pub mod exercise;
pub mod nutrition;
pub mod progress;
pub mod user;
pub mod workout;

pub use analytics::AnalyticsService;
pub use exercise::ExerciseService;
pub use nutrition::NutritionService;
pub use progress::ProgressService;
pub use user::UserService;
pub use workout::WorkoutService;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Convert a NUMERIC column value to f64
pub(crate) fn decimal_to_f64(d: &Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}
