//! Person-name rules shared by members and authors

use crate::error::DomainError;

pub const MAX_NAME_LENGTH: usize = 50;

/// Validate and normalise a personal name.
///
/// Returns the trimmed name. Letters from any script are accepted along
/// with inner spaces, hyphens and apostrophes.
pub fn validate_name(field: &str, raw: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidName(format!("{field} is required")));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidName(format!(
            "{field} must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    if !name.chars().any(char::is_alphabetic) {
        return Err(DomainError::InvalidName(format!("{field} must contain letters")));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_alphabetic() || matches!(c, ' ' | '-' | '\'')))
    {
        return Err(DomainError::InvalidName(format!(
            "{field} contains invalid character '{bad}'"
        )));
    }
    Ok(name.to_string())
}
