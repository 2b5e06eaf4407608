//! Common validation utilities for domain values
//!
//! Field-level checks shared by the request validator and the value objects.

use crate::domain::errors::DomainError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Cached regex patterns for common validations
static ALPHANUMERIC_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("Invalid alphanumeric regex"));

/// Validation result type
pub type ValidationResult<T> = Result<T, DomainError>;

/// Common validation utilities
pub struct Validation;

impl Validation {
    /// Validate that a string is not empty or whitespace-only
    pub fn validate_not_empty(value: &str, field_name: &str) -> ValidationResult<()> {
        if value.trim().is_empty() {
            return Err(DomainError::validation(field_name, "Field cannot be empty"));
        }
        Ok(())
    }

    /// Reject NUL characters, which text columns cannot hold
    pub fn validate_no_nul(value: &str, field_name: &str) -> ValidationResult<()> {
        if value.contains('\0') {
            return Err(DomainError::validation(
                field_name,
                "Field cannot contain NUL characters",
            ));
        }
        Ok(())
    }

    /// Validate the UTF-8 byte size of a value
    pub fn validate_max_bytes(
        value: &str,
        field_name: &str,
        max_bytes: usize,
    ) -> ValidationResult<()> {
        if value.len() > max_bytes {
            return Err(DomainError::validation(
                field_name,
                format!(
                    "Field is {} bytes, exceeding the maximum of {} bytes",
                    value.len(),
                    max_bytes
                ),
            ));
        }
        Ok(())
    }

    /// Validate string length constraints (in characters)
    pub fn validate_length(
        value: &str,
        field_name: &str,
        min_length: Option<usize>,
        max_length: Option<usize>,
    ) -> ValidationResult<()> {
        let len = value.chars().count();

        if let Some(min) = min_length {
            if len < min {
                return Err(DomainError::validation(
                    field_name,
                    format!("Field length must be at least {} characters", min),
                ));
            }
        }

        if let Some(max) = max_length {
            if len > max {
                return Err(DomainError::validation(
                    field_name,
                    format!("Field length must be at most {} characters", max),
                ));
            }
        }

        Ok(())
    }

    /// Validate that a string contains only ASCII letters and digits
    pub fn validate_alphanumeric(value: &str, field_name: &str) -> ValidationResult<()> {
        if !ALPHANUMERIC_REGEX.is_match(value) {
            return Err(DomainError::validation(
                field_name,
                "Field can only contain alphanumeric characters",
            ));
        }
        Ok(())
    }

    /// Reject values that could be interpreted as a filesystem path
    pub fn validate_path_safe(value: &str, field_name: &str) -> ValidationResult<()> {
        if value.contains('/') || value.contains('\\') || value.contains("..") {
            return Err(DomainError::validation(
                field_name,
                "Field cannot contain path separators or '..'",
            ));
        }

        if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(DomainError::validation(
                field_name,
                "Field cannot contain whitespace or control characters",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(Validation::validate_not_empty("test", "field").is_ok());
        assert!(Validation::validate_not_empty(" spaces ", "field").is_ok());

        for s in ["", "   ", "\t", "\n", " \t \n "] {
            assert!(
                Validation::validate_not_empty(s, "field").is_err(),
                "String should be invalid: {:?}",
                s
            );
        }
    }

    #[test]
    fn test_validate_max_bytes_counts_utf8_bytes() {
        assert!(Validation::validate_max_bytes("abcd", "content", 4).is_ok());
        assert!(Validation::validate_max_bytes("abcde", "content", 4).is_err());
        // "é" is two bytes in UTF-8
        assert!(Validation::validate_max_bytes("ééé", "content", 5).is_err());
        assert!(Validation::validate_max_bytes("ééé", "content", 6).is_ok());
    }

    #[test]
    fn test_validate_length_edge_cases() {
        assert!(Validation::validate_length("ab", "field", Some(2), Some(10)).is_ok());
        assert!(Validation::validate_length("abcdefghij", "field", Some(2), Some(10)).is_ok());
        assert!(Validation::validate_length("a", "field", Some(2), Some(10)).is_err());
        assert!(Validation::validate_length("abcdefghijk", "field", Some(2), Some(10)).is_err());
        assert!(Validation::validate_length("", "field", None, Some(10)).is_ok());
        assert!(Validation::validate_length("any length", "field", None, None).is_ok());
    }

    #[test]
    fn test_validate_alphanumeric() {
        assert!(Validation::validate_alphanumeric("rs", "extension").is_ok());
        assert!(Validation::validate_alphanumeric("Mp4", "extension").is_ok());
        assert!(Validation::validate_alphanumeric("tar.gz", "extension").is_err());
        assert!(Validation::validate_alphanumeric("c++", "extension").is_err());
        assert!(Validation::validate_alphanumeric("", "extension").is_err());
    }

    #[test]
    fn test_validate_path_safe() {
        assert!(Validation::validate_path_safe("tar.gz", "extension").is_ok());
        assert!(Validation::validate_path_safe("c++", "extension").is_ok());

        for s in ["../etc", "a/b", "a\\b", "..", "with space", "nul\0"] {
            assert!(
                Validation::validate_path_safe(s, "extension").is_err(),
                "Value should be rejected: {:?}",
                s
            );
        }
    }

    #[test]
    fn test_validation_error_messages() {
        let err = Validation::validate_not_empty("", "content").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("content"));
        assert!(msg.contains("empty"));

        let err = Validation::validate_max_bytes("toolong", "content", 3).unwrap_err();
        assert!(err.to_string().contains("maximum of 3 bytes"));
    }
}
