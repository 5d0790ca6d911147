//! User profile validation.

use crate::error::CoreError;

pub const MIN_DISPLAY_NAME_LENGTH: usize = 3;
pub const MAX_DISPLAY_NAME_LENGTH: usize = 20;

/// Validate a display name. Expects the caller to have trimmed the input.
pub fn validate_display_name(name: &str) -> Result<(), CoreError> {
    let len = name.chars().count();
    if len < MIN_DISPLAY_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Display name must be at least {MIN_DISPLAY_NAME_LENGTH} characters long (got {len})"
        )));
    }
    if len > MAX_DISPLAY_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Display name exceeds maximum length of {MAX_DISPLAY_NAME_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

/// Minimal structural email check: one `@` with a non-empty local part and
/// a domain containing a dot, no whitespace.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let invalid = || CoreError::Validation(format!("'{email}' is not a valid email address"));

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.contains('@') {
        return Err(invalid());
    }
    Ok(())
}
