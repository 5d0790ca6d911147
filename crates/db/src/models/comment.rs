//! Comment entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use addonforge_core::types::{DbId, Timestamp};

/// A row from the `comments` table.
///
/// `is_admin` is a snapshot of the author's admin flag at post time and is
/// never retro-updated. `parent_id`, when present, references a top-level
/// comment of the same request (enforced at write time).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub request_id: DbId,
    pub user_id: DbId,
    pub user_name: String,
    pub user_avatar: Option<String>,
    pub text: String,
    pub is_admin: bool,
    pub parent_id: Option<DbId>,
    /// Display name of the replied-to comment's author, filled server-side.
    pub reply_to_user_name: Option<String>,
    pub created_at: Timestamp,
}

/// Client-supplied fields for posting a comment.
#[derive(Debug, Deserialize)]
pub struct CreateComment {
    pub text: String,
    /// Optional reply target; must be a top-level comment of the same request.
    pub parent_id: Option<DbId>,
}

/// Resolved insert payload: validated text plus server-derived author
/// snapshot and reply metadata.
#[derive(Debug)]
pub struct InsertComment {
    pub request_id: DbId,
    pub user_id: DbId,
    pub user_name: String,
    pub user_avatar: Option<String>,
    pub text: String,
    pub is_admin: bool,
    pub parent_id: Option<DbId>,
    pub reply_to_user_name: Option<String>,
}
