//! Comment validation.

use crate::error::CoreError;

/// Maximum length for a comment body (characters).
pub const MAX_COMMENT_LENGTH: usize = 1000;

/// Validate a comment body. Expects the caller to have trimmed the input.
///
/// Rejects empty text and text over [`MAX_COMMENT_LENGTH`] characters.
pub fn validate_text(text: &str) -> Result<(), CoreError> {
    if text.is_empty() {
        return Err(CoreError::Validation("Comment must not be empty".into()));
    }
    let len = text.chars().count();
    if len > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comment exceeds maximum length of {MAX_COMMENT_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}
