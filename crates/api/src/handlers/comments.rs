//! Handlers and read-side projection for request comments.
//!
//! Comments are stored flat with an optional `parent_id`; the thread shape
//! shown to clients is derived on read. Because the write path only accepts
//! replies to top-level comments, the projection never drops a comment.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use addonforge_core::comment as comment_rules;
use addonforge_core::error::CoreError;
use addonforge_core::types::DbId;
use addonforge_db::models::comment::{Comment, CreateComment, InsertComment};
use addonforge_db::repositories::CommentRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::requests::{find_request, load_actor};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Read-side projection
// ---------------------------------------------------------------------------

/// A top-level comment with its replies attached.
#[derive(Debug, Serialize)]
pub struct ThreadedComment {
    #[serde(flatten)]
    pub comment: Comment,
    pub replies: Vec<Comment>,
}

/// Partition a flat comment list into top-level comments, each carrying the
/// replies whose `parent_id` points at it. Input order (posting order) is
/// preserved within both levels.
pub fn thread_comments(comments: Vec<Comment>) -> Vec<ThreadedComment> {
    let (top_level, replies): (Vec<Comment>, Vec<Comment>) =
        comments.into_iter().partition(|c| c.parent_id.is_none());

    top_level
        .into_iter()
        .map(|comment| {
            let own_replies = replies
                .iter()
                .filter(|r| r.parent_id == Some(comment.id))
                .cloned()
                .collect();
            ThreadedComment {
                comment,
                replies: own_replies,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// POST /requests/{id}/comments
// ---------------------------------------------------------------------------

/// Append a comment to a request. Authenticated.
///
/// The author snapshot (name, avatar, admin flag) is taken from the
/// caller's profile at post time. A reply target must be a top-level
/// comment of the same request.
pub async fn add_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
    Json(input): Json<CreateComment>,
) -> AppResult<impl IntoResponse> {
    let text = input.text.trim().to_string();
    comment_rules::validate_text(&text)?;

    let request = find_request(&state, request_id).await?;

    let reply_to_user_name = match input.parent_id {
        Some(parent_id) => {
            let parent = CommentRepo::find_reply_target(&state.pool, request.id, parent_id)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Validation(format!(
                        "Reply target {parent_id} is not a top-level comment of this request"
                    )))
                })?;
            Some(parent.user_name)
        }
        None => None,
    };

    let actor = load_actor(&state, &auth).await?;

    let insert = InsertComment {
        request_id: request.id,
        user_id: actor.id,
        user_name: actor.display_name,
        user_avatar: actor.avatar_url,
        text,
        is_admin: actor.is_admin,
        parent_id: input.parent_id,
        reply_to_user_name,
    };
    let comment = CommentRepo::create(&state.pool, &insert).await?;

    tracing::info!(
        comment_id = comment.id,
        request_id = request.id,
        user_id = auth.user_id,
        is_reply = comment.parent_id.is_some(),
        "Comment posted",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
