//! FitTrack Shared Library
//!
//! This crate contains shared types, models, and utilities used across
//! the backend and WASM modules.

pub mod errors;
pub mod health_metrics;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use health_metrics::*;
pub use models::{weekday_name, ActivityLevel, DifficultyLevel, MealType};
