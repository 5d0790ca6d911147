//! Add-on request constants, validation, and list-projection predicates.
//!
//! Defines the valid categories, statuses, priorities, and sort modes for
//! add-on requests plus the validation helpers used by the API and
//! repository layers. Statuses are a flat set: any status may be set
//! directly to any other, so there is deliberately no transition table.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Category constants
// ---------------------------------------------------------------------------

pub const CATEGORY_UI: &str = "UI";
pub const CATEGORY_COMBAT: &str = "Combat";
pub const CATEGORY_UTILITY: &str = "Utility";
pub const CATEGORY_SOCIAL: &str = "Social";
pub const CATEGORY_PROFESSION: &str = "Profession";
pub const CATEGORY_OTHER: &str = "Other";

/// All valid add-on categories.
pub const VALID_CATEGORIES: &[&str] = &[
    CATEGORY_UI,
    CATEGORY_COMBAT,
    CATEGORY_UTILITY,
    CATEGORY_SOCIAL,
    CATEGORY_PROFESSION,
    CATEGORY_OTHER,
];

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Initial status for a newly submitted request.
pub const STATUS_REQUESTED: &str = "requested";
/// An admin is evaluating feasibility.
pub const STATUS_ANALYZING: &str = "analyzing";
/// Development has started.
pub const STATUS_IN_PROGRESS: &str = "in-progress";
/// The add-on has been built and released.
pub const STATUS_COMPLETED: &str = "completed";
/// The request will not be implemented.
pub const STATUS_REJECTED: &str = "rejected";

/// All valid request statuses.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_REQUESTED,
    STATUS_ANALYZING,
    STATUS_IN_PROGRESS,
    STATUS_COMPLETED,
    STATUS_REJECTED,
];

// ---------------------------------------------------------------------------
// Priority constants
// ---------------------------------------------------------------------------

pub const PRIORITY_LOW: &str = "low";
pub const PRIORITY_MEDIUM: &str = "medium";
pub const PRIORITY_HIGH: &str = "high";

/// All valid priorities.
pub const VALID_PRIORITIES: &[&str] = &[PRIORITY_LOW, PRIORITY_MEDIUM, PRIORITY_HIGH];

// ---------------------------------------------------------------------------
// Sort modes and filters
// ---------------------------------------------------------------------------

/// Newest first (default).
pub const SORT_RECENT: &str = "recent";
/// Most upvoted first.
pub const SORT_POPULAR: &str = "popular";
/// Oldest first.
pub const SORT_OLDEST: &str = "oldest";

/// All valid sort modes for the request list.
pub const VALID_SORTS: &[&str] = &[SORT_RECENT, SORT_POPULAR, SORT_OLDEST];

/// Wildcard filter value that bypasses a category/status filter.
pub const FILTER_ALL: &str = "all";

// ---------------------------------------------------------------------------
// Validation constants
// ---------------------------------------------------------------------------

pub const MIN_TITLE_LENGTH: usize = 5;
pub const MAX_TITLE_LENGTH: usize = 100;
pub const MIN_DESCRIPTION_LENGTH: usize = 20;
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

/// Validate that a category string is one of the known categories.
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if VALID_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid category '{category}'. Must be one of: {VALID_CATEGORIES:?}"
        )))
    }
}

/// Validate that a status string is one of the known statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

/// Validate that a priority string is one of the known priorities.
pub fn validate_priority(priority: &str) -> Result<(), CoreError> {
    if VALID_PRIORITIES.contains(&priority) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid priority '{priority}'. Must be one of: {VALID_PRIORITIES:?}"
        )))
    }
}

/// Validate that a sort mode is one of the known modes.
pub fn validate_sort(sort: &str) -> Result<(), CoreError> {
    if VALID_SORTS.contains(&sort) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid sort mode '{sort}'. Must be one of: {VALID_SORTS:?}"
        )))
    }
}

/// Validate the title length. Expects the caller to have trimmed the input.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let len = title.chars().count();
    if len < MIN_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title must be at least {MIN_TITLE_LENGTH} characters long (got {len})"
        )));
    }
    if len > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title exceeds maximum length of {MAX_TITLE_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

/// Validate the description length. Expects the caller to have trimmed the input.
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    let len = description.chars().count();
    if len < MIN_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description must be at least {MIN_DESCRIPTION_LENGTH} characters long (got {len})"
        )));
    }
    if len > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

/// Normalize user-supplied tags: trim each and drop the empties.
pub fn normalize_tags(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// List projection predicates
// ---------------------------------------------------------------------------

/// Case-insensitive substring match against title OR description.
///
/// An empty (or whitespace-only) query matches everything.
pub fn matches_query(title: &str, description: &str, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    title.to_lowercase().contains(&query) || description.to_lowercase().contains(&query)
}

/// Exact-match filter; `None` or `"all"` bypasses the filter.
pub fn matches_filter(value: &str, filter: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(f) if f == FILTER_ALL => true,
        Some(f) => value == f,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
