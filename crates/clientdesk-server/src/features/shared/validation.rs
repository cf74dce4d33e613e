//! Shared input validation

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameValidationError {
    #[error("Name is required and cannot be empty")]
    Required,
    #[error("Name must not exceed {max_length} characters")]
    TooLong { max_length: usize },
}

/// Validate a name field
///
/// # Rules
/// - Must not be empty (after trimming whitespace)
/// - Must not exceed `max_length` characters
pub fn validate_name(name: &str, max_length: usize) -> Result<(), NameValidationError> {
    if name.trim().is_empty() {
        return Err(NameValidationError::Required);
    }

    if name.chars().count() > max_length {
        return Err(NameValidationError::TooLong { max_length });
    }

    Ok(())
}

/// Reject negative monetary amounts. Amounts are integer cents.
pub fn validate_amount(field: &'static str, value: i64) -> Result<(), String> {
    if value < 0 {
        return Err(format!("{} must not be negative", field));
    }
    Ok(())
}
