//! Error types for the FitTrack domain

use thiserror::Error;

/// Errors raised while interpreting user-supplied domain values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid {field}: '{value}' (expected one of: {expected})")]
    InvalidVariant {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{0}")]
    OutOfRange(String),
}

impl DomainError {
    pub(crate) fn invalid_variant(field: &'static str, value: &str, expected: &'static str) -> Self {
        DomainError::InvalidVariant {
            field,
            value: value.to_string(),
            expected,
        }
    }
}
