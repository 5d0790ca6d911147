//! Handlers for the `/requests` resource.
//!
//! The public list endpoint fetches the whole collection and projects it in
//! memory with pure filter/sort functions, mirroring how the product
//! browses requests (no pagination, full snapshot). Mutations go through
//! the repository's atomic statements.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use addonforge_core::error::CoreError;
use addonforge_core::request as request_rules;
use addonforge_core::request::{SORT_OLDEST, SORT_POPULAR};
use addonforge_core::types::DbId;
use addonforge_db::models::request::{
    CreateRequest, InsertRequest, Request, RequestListParams, UpdateRequest,
};
use addonforge_db::models::user::User;
use addonforge_db::repositories::{CommentRepo, RequestRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::comments::{thread_comments, ThreadedComment};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Full detail for one request: the row plus its threaded comments.
#[derive(Debug, Serialize)]
pub struct RequestDetail {
    #[serde(flatten)]
    pub request: Request,
    pub comments: Vec<ThreadedComment>,
}

/// Response for the vote toggle.
#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub has_upvoted: bool,
    #[serde(flatten)]
    pub request: Request,
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Load the caller's profile row, or 401 if the account vanished.
pub(crate) async fn load_actor(state: &AppState, auth: &AuthUser) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))
}

/// Reject callers that neither own the request nor hold the admin flag.
pub(crate) fn ensure_owner_or_admin(auth: &AuthUser, request: &Request) -> AppResult<()> {
    if !auth.is_admin && request.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author or an admin may modify this request".into(),
        )));
    }
    Ok(())
}

/// Fetch a request or 404.
pub(crate) async fn find_request(state: &AppState, id: DbId) -> AppResult<Request> {
    RequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id,
        }))
}

// ---------------------------------------------------------------------------
// POST /requests
// ---------------------------------------------------------------------------

/// Submit a new add-on request. Status always starts at `requested` with an
/// empty voter set; the author snapshot comes from the caller's profile.
pub async fn create_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateRequest>,
) -> AppResult<impl IntoResponse> {
    let title = input.title.trim().to_string();
    let description = input.description.trim().to_string();
    request_rules::validate_title(&title)?;
    request_rules::validate_description(&description)?;
    request_rules::validate_category(&input.category)?;

    let priority = input
        .priority
        .unwrap_or_else(|| request_rules::PRIORITY_MEDIUM.to_string());
    request_rules::validate_priority(&priority)?;

    let tags = input
        .tags
        .map(|raw| request_rules::normalize_tags(&raw))
        .filter(|tags| !tags.is_empty());

    let actor = load_actor(&state, &auth).await?;

    let insert = InsertRequest {
        title,
        description,
        category: input.category,
        priority,
        user_id: actor.id,
        user_name: actor.display_name,
        user_avatar: actor.avatar_url,
        tags,
    };
    let request = RequestRepo::create(&state.pool, &insert).await?;

    tracing::info!(
        request_id = request.id,
        user_id = auth.user_id,
        category = %request.category,
        "Request created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

// ---------------------------------------------------------------------------
// GET /requests
// ---------------------------------------------------------------------------

/// List requests with free-text search, category/status filters, and a sort
/// mode. Public.
pub async fn list_requests(
    State(state): State<AppState>,
    Query(params): Query<RequestListParams>,
) -> AppResult<Json<DataResponse<Vec<Request>>>> {
    if let Some(ref category) = params.category {
        if category != request_rules::FILTER_ALL {
            request_rules::validate_category(category)?;
        }
    }
    if let Some(ref status) = params.status {
        if status != request_rules::FILTER_ALL {
            request_rules::validate_status(status)?;
        }
    }
    if let Some(ref sort) = params.sort {
        request_rules::validate_sort(sort)?;
    }

    let requests = RequestRepo::list_all(&state.pool).await?;
    let projected = project_requests(requests, &params);

    Ok(Json(DataResponse { data: projected }))
}

/// Pure in-memory projection over a snapshot of the collection: filter by
/// query/category/status, then sort. Stable sorts keep ties in their
/// incoming order.
fn project_requests(mut requests: Vec<Request>, params: &RequestListParams) -> Vec<Request> {
    let query = params.q.as_deref().unwrap_or("");

    requests.retain(|r| {
        request_rules::matches_query(&r.title, &r.description, query)
            && request_rules::matches_filter(&r.category, params.category.as_deref())
            && request_rules::matches_filter(&r.status, params.status.as_deref())
    });

    match params.sort.as_deref() {
        Some(SORT_POPULAR) => requests.sort_by(|a, b| b.upvotes.cmp(&a.upvotes)),
        Some(SORT_OLDEST) => requests.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        // "recent" and the default: newest first.
        _ => requests.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }

    requests
}

// ---------------------------------------------------------------------------
// GET /requests/{id}
// ---------------------------------------------------------------------------

/// Full request detail including threaded comments. Public.
pub async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RequestDetail>>> {
    let request = find_request(&state, id).await?;
    let comments = CommentRepo::list_for_request(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: RequestDetail {
            request,
            comments: thread_comments(comments),
        },
    }))
}

// ---------------------------------------------------------------------------
// PUT /requests/{id}
// ---------------------------------------------------------------------------

/// Update a request's content fields. Owner or admin. Status and external
/// links are only reachable through the admin surface.
pub async fn update_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRequest>,
) -> AppResult<Json<DataResponse<Request>>> {
    let existing = find_request(&state, id).await?;
    ensure_owner_or_admin(&auth, &existing)?;

    let title = match input.title {
        Some(t) => {
            let t = t.trim().to_string();
            request_rules::validate_title(&t)?;
            Some(t)
        }
        None => None,
    };
    let description = match input.description {
        Some(d) => {
            let d = d.trim().to_string();
            request_rules::validate_description(&d)?;
            Some(d)
        }
        None => None,
    };
    if let Some(ref category) = input.category {
        request_rules::validate_category(category)?;
    }
    if let Some(ref priority) = input.priority {
        request_rules::validate_priority(priority)?;
    }
    let tags = input.tags.map(|raw| request_rules::normalize_tags(&raw));

    let update = UpdateRequest {
        title,
        description,
        category: input.category,
        priority: input.priority,
        tags,
    };

    let request = RequestRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id,
        }))?;

    tracing::info!(request_id = id, user_id = auth.user_id, "Request updated");

    Ok(Json(DataResponse { data: request }))
}

// ---------------------------------------------------------------------------
// DELETE /requests/{id}
// ---------------------------------------------------------------------------

/// Delete a request. Owner or admin.
///
/// Screenshot blobs are swept first, best-effort: failures are logged and
/// the record delete proceeds regardless, so an orphaned blob is possible
/// but a half-deleted record is not. Comments cascade with the row.
pub async fn delete_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = find_request(&state, id).await?;
    ensure_owner_or_admin(&auth, &existing)?;

    let deleted_blobs = state.screenshots.delete_all(&existing.screenshots).await;
    if deleted_blobs < existing.screenshots.len() {
        tracing::warn!(
            request_id = id,
            expected = existing.screenshots.len(),
            deleted = deleted_blobs,
            "Some screenshot blobs could not be deleted; proceeding with record delete",
        );
    }

    if !RequestRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id,
        }));
    }

    tracing::info!(request_id = id, user_id = auth.user_id, "Request deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// POST /requests/{id}/vote
// ---------------------------------------------------------------------------

/// Toggle the caller's upvote. Adding and removing are the same operation;
/// toggling twice returns the request to its original state.
pub async fn toggle_vote(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<VoteResponse>>> {
    let request = RequestRepo::toggle_vote(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id,
        }))?;

    let has_upvoted = request.upvoted_by.contains(&auth.user_id);

    tracing::info!(
        request_id = id,
        user_id = auth.user_id,
        has_upvoted,
        upvotes = request.upvotes,
        "Vote toggled",
    );

    Ok(Json(DataResponse {
        data: VoteResponse {
            has_upvoted,
            request,
        },
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
