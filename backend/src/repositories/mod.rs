//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod analytics;
pub mod exercise;
pub mod food;
pub mod progress;
pub mod user;
pub mod workout;

pub use analytics::AnalyticsRepository;
pub use exercise::{ExerciseRecord, ExerciseRepository};
pub use food::{CreateNutritionLog, FoodRecord, FoodRepository, NutritionLogRepository};
pub use progress::{CreateProgress, ProgressRepository};
pub use user::{CreateProfile, UpdateProfile, UserProfileRecord, UserRepository};
pub use workout::{
    NewSession, NewSessionExercise, NewTemplate, NewTemplateExercise, WorkoutRepository,
};
