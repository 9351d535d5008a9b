use thiserror::Error;

/// Rejections raised while turning raw request data into domain records.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Target amount must be positive, got {0}")]
    NonPositiveTarget(f64),

    #[error("Current amount must not be negative, got {0}")]
    NegativeCurrent(f64),

    #[error("Amount in '{field}' is not a finite number")]
    NonFiniteAmount { field: String },

    #[error("Invalid date in '{field}': '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { field: String, value: String },
}
