//! Handlers for the admin surface: dashboard stats and request triage.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use addonforge_core::error::CoreError;
use addonforge_core::request as request_rules;
use addonforge_core::types::DbId;
use addonforge_db::models::request::{AdminUpdateRequest, Request, RequestStats};
use addonforge_db::repositories::{CommentRepo, RequestRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Aggregate numbers for the admin dashboard.
#[derive(Debug, Serialize)]
pub struct AdminStats {
    #[serde(flatten)]
    pub requests: RequestStats,
    pub total_comments: i64,
    pub total_users: i64,
}

// ---------------------------------------------------------------------------
// GET /admin/stats
// ---------------------------------------------------------------------------

/// Dashboard counts: total and per-status requests, summed upvotes, total
/// comments, total users. Admin only.
pub async fn stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<AdminStats>>> {
    let requests = RequestRepo::stats(&state.pool).await?;
    let total_comments = CommentRepo::count_all(&state.pool).await?;
    let total_users = UserRepo::count_all(&state.pool).await?;

    Ok(Json(DataResponse {
        data: AdminStats {
            requests,
            total_comments,
            total_users,
        },
    }))
}

// ---------------------------------------------------------------------------
// PUT /admin/requests/{id}
// ---------------------------------------------------------------------------

/// Triage a request: status, priority, and external links. Admin only.
///
/// The status set is flat -- any status may be set directly to any other,
/// no intermediate step required.
pub async fn update_request(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AdminUpdateRequest>,
) -> AppResult<Json<DataResponse<Request>>> {
    if let Some(ref status) = input.status {
        request_rules::validate_status(status)?;
    }
    if let Some(ref priority) = input.priority {
        request_rules::validate_priority(priority)?;
    }

    let current = RequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id,
        }))?;

    let updated = RequestRepo::admin_update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id,
        }))?;

    tracing::info!(
        request_id = id,
        from = %current.status,
        to = %updated.status,
        user_id = admin.user_id,
        "Request triaged",
    );

    Ok(Json(DataResponse { data: updated }))
}
