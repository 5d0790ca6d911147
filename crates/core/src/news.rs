//! News article validation.

use crate::error::CoreError;

/// Maximum length for a news article title (characters).
pub const MAX_NEWS_TITLE_LENGTH: usize = 150;

/// Number of articles shown on the public news page.
pub const PUBLIC_NEWS_LIMIT: i64 = 10;

/// Validate a news title. Expects the caller to have trimmed the input.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.is_empty() {
        return Err(CoreError::Validation("News title must not be empty".into()));
    }
    let len = title.chars().count();
    if len > MAX_NEWS_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "News title exceeds maximum length of {MAX_NEWS_TITLE_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

/// Validate a news body. Expects the caller to have trimmed the input.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.is_empty() {
        return Err(CoreError::Validation("News content must not be empty".into()));
    }
    Ok(())
}
