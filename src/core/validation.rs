//! Input validation for secret names.

use crate::error::{ConfigError, Result};

/// Validate a secret name.
///
/// Secret names double as container environment variable names:
/// - Only A-Z, 0-9, and underscore
/// - Cannot start with a digit
/// - Cannot be empty
/// - Cannot start with `GITHUB_` (reserved by the secret store)
///
/// # Errors
///
/// Returns `ConfigError::InvalidSecretName` if the name is invalid.
pub fn validate_name(name: &str) -> Result<()> {
    let invalid = |reason: String| -> crate::error::Error {
        ConfigError::InvalidSecretName {
            name: name.to_string(),
            reason,
        }
        .into()
    };

    if name.is_empty() {
        return Err(invalid("cannot be empty".to_string()));
    }

    if name.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return Err(invalid("cannot start with a digit".to_string()));
    }

    for (i, ch) in name.chars().enumerate() {
        if !ch.is_ascii_uppercase() && !ch.is_ascii_digit() && ch != '_' {
            return Err(invalid(format!(
                "invalid character '{}' at position {}. Only A-Z, 0-9, and underscore are allowed",
                ch,
                i + 1
            )));
        }
    }

    if name.starts_with("GITHUB_") {
        return Err(invalid("the GITHUB_ prefix is reserved".to_string()));
    }

    Ok(())
}
