//! Input validation functions
//!
//! Request DTOs carry `validator` derive rules for field presence and
//! ranges. The helpers below cover the checks that depend on runtime
//! configuration or on more than one field.

use crate::errors::DomainError;
use chrono::{DateTime, Utc};
use validator::ValidationErrors;

/// Smallest serving that survives two-decimal storage
pub const MIN_SERVING_GRAMS: f64 = 0.01;
/// Largest logged serving
pub const MAX_SERVING_GRAMS: f64 = 10_000.0;
/// Largest magnitude a progress value column holds
pub const MAX_MEASUREMENT_VALUE: f64 = 99_999_999.99;

/// Validate password length against the configured minimum
pub fn validate_password(password: &str, min_length: usize) -> Result<(), String> {
    if password.chars().count() < min_length {
        return Err(format!(
            "password must be at least {} characters",
            min_length
        ));
    }
    if password.len() > 128 {
        return Err("password too long".to_string());
    }
    Ok(())
}

/// Normalize an email address for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate that a text field is not blank
pub fn validate_not_blank(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }
    Ok(())
}

/// Validate that a floating point value is a real number
pub fn validate_finite(field: &str, value: f64) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err(format!("{} must be a valid number", field));
    }
    Ok(())
}

/// Validate the grams of a logged serving
pub fn validate_serving_grams(grams: f64) -> Result<(), String> {
    validate_finite("serving size", grams)?;
    if grams < MIN_SERVING_GRAMS {
        return Err(format!(
            "serving size must be at least {} grams",
            MIN_SERVING_GRAMS
        ));
    }
    if grams > MAX_SERVING_GRAMS {
        return Err(format!(
            "serving size must be at most {} grams",
            MAX_SERVING_GRAMS
        ));
    }
    Ok(())
}

/// Validate a progress measurement value
pub fn validate_measurement_value(value: f64) -> Result<(), DomainError> {
    if !value.is_finite() {
        return Err(DomainError::OutOfRange(
            "value must be a valid number".to_string(),
        ));
    }
    if value.abs() > MAX_MEASUREMENT_VALUE {
        return Err(DomainError::OutOfRange(format!(
            "value must be between -{max} and {max}",
            max = MAX_MEASUREMENT_VALUE
        )));
    }
    Ok(())
}

/// Validate that a session does not complete before it starts
pub fn validate_session_times(
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
) -> Result<(), String> {
    match completed_at {
        Some(completed) if completed < started_at => {
            Err("completedAt must not be before startedAt".to_string())
        }
        _ => Ok(()),
    }
}

/// Flatten `validator` errors into a single human readable message
///
/// Field names are sorted so the message is stable between calls.
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let detail = errs
                .iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .next()
                .unwrap_or_else(|| "is invalid".to_string());
            format!("{}: {}", field, detail)
        })
        .collect();

    if messages.is_empty() {
        return errors.to_string();
    }

    messages.sort();
    messages.join("; ")
}
