//! Add-on request entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use addonforge_core::types::{DbId, Timestamp};

/// A row from the `requests` table.
///
/// `upvotes` is a redundant counter over `upvoted_by`; both are maintained
/// by a single atomic UPDATE in [`crate::repositories::RequestRepo::toggle_vote`]
/// and backed by a CHECK constraint, so `upvotes == upvoted_by.len()` always
/// holds.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Request {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub priority: String,
    pub user_id: DbId,
    /// Author display name snapshot at creation time (allowed to drift).
    pub user_name: String,
    pub user_avatar: Option<String>,
    pub upvotes: i32,
    pub upvoted_by: Vec<DbId>,
    /// Stored blob paths, at most 5.
    pub screenshots: Vec<String>,
    pub github_repo: Option<String>,
    pub download_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Client-supplied fields for creating a request.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    /// Defaults to `"medium"` when absent.
    pub priority: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Resolved insert payload: validated client fields plus the server-derived
/// author snapshot. Built by the handler, consumed by the repository.
#[derive(Debug)]
pub struct InsertRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub user_id: DbId,
    pub user_name: String,
    pub user_avatar: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// DTO for the owner-facing update. Status and links are deliberately
/// absent -- those move only through the admin surface.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// DTO for the admin-only update (status, priority, external links).
///
/// An empty string for a link field clears it.
#[derive(Debug, Deserialize)]
pub struct AdminUpdateRequest {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub github_repo: Option<String>,
    pub download_url: Option<String>,
}

/// Query parameters for the public request list.
#[derive(Debug, Deserialize)]
pub struct RequestListParams {
    /// Free-text query matched against title OR description.
    pub q: Option<String>,
    /// Exact category, or `"all"`.
    pub category: Option<String>,
    /// Exact status, or `"all"`.
    pub status: Option<String>,
    /// `"recent"` (default), `"popular"`, or `"oldest"`.
    pub sort: Option<String>,
}

/// Aggregate dashboard counts for the admin overview.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RequestStats {
    pub total: i64,
    pub requested: i64,
    pub analyzing: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub rejected: i64,
    pub total_upvotes: i64,
}
