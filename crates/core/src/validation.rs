//! Field validators shared by every seed row.
//!
//! Each returns a `CoreError::Validation` naming the offending field.

use rust_decimal::Decimal;

use crate::error::CoreError;

/// Sentinel `port_documents.port_code` for documents required at every U.S. port.
pub const ALL_US_PORT_CODE: &str = "ALL_US";

/// Codes are upper-case ASCII letters, digits and underscores.
pub fn validate_code(value: &str, field: &str, max_len: usize) -> Result<(), CoreError> {
    if value.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters, got {} ('{value}')",
            value.len()
        )));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(CoreError::Validation(format!(
            "{field} must contain only A-Z, 0-9 and '_', got '{value}'"
        )));
    }
    Ok(())
}

/// Exactly `len` upper-case ASCII letters (states, countries, currencies).
pub fn validate_alpha_code(value: &str, field: &str, len: usize) -> Result<(), CoreError> {
    if value.len() != len || !value.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(CoreError::Validation(format!(
            "{field} must be {len} upper-case letters, got '{value}'"
        )));
    }
    Ok(())
}

pub fn validate_optional_alpha_code(
    value: Option<&str>,
    field: &str,
    len: usize,
) -> Result<(), CoreError> {
    match value {
        Some(v) => validate_alpha_code(v, field, len),
        None => Ok(()),
    }
}

/// Non-empty text within `max_len` characters.
pub fn validate_name(value: &str, field: &str, max_len: usize) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > max_len {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(())
}

/// Absolute http(s) URL.
pub fn validate_url(value: &str, field: &str) -> Result<(), CoreError> {
    let parsed = url::Url::parse(value)
        .map_err(|e| CoreError::Validation(format!("{field} is not a valid URL ('{value}'): {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(CoreError::Validation(format!(
            "{field} must use http or https, got scheme '{other}'"
        ))),
    }
}

pub fn validate_optional_url(value: Option<&str>, field: &str) -> Result<(), CoreError> {
    match value {
        Some(v) => validate_url(v, field),
        None => Ok(()),
    }
}

/// Monetary amounts are never negative.
pub fn validate_non_negative(value: Decimal, field: &str) -> Result<(), CoreError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(CoreError::Validation(format!(
            "{field} must not be negative, got {value}"
        )));
    }
    Ok(())
}
