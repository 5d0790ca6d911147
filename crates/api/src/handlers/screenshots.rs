//! Handlers for screenshot upload and removal on a request.
//!
//! Uploads arrive as multipart `file` fields. Every file is validated
//! (image header sniff, size, per-request count) before any blob is
//! written, so a rejected batch leaves no partial state behind.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::Deserialize;

use addonforge_core::error::CoreError;
use addonforge_core::screenshot;
use addonforge_core::types::DbId;
use addonforge_db::models::request::Request;
use addonforge_db::repositories::RequestRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::requests::{ensure_owner_or_admin, find_request};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for removing one screenshot.
#[derive(Debug, Deserialize)]
pub struct DeleteScreenshot {
    /// The stored path as returned in `screenshots`.
    pub path: String,
}

// ---------------------------------------------------------------------------
// POST /requests/{id}/screenshots
// ---------------------------------------------------------------------------

/// Attach screenshots to a request. Owner or admin.
pub async fn upload_screenshots(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<Request>>> {
    let request = find_request(&state, id).await?;
    ensure_owner_or_admin(&auth, &request)?;

    // Collect and validate every file before writing any blob.
    let mut files: Vec<(&'static str, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue; // ignore unknown fields
        }

        let filename = field.file_name().unwrap_or("screenshot").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        screenshot::validate_size(&filename, data.len())?;
        let extension = screenshot::sniff_extension(&filename, &data)?;
        files.push((extension, data.to_vec()));
    }

    if files.is_empty() {
        return Err(AppError::BadRequest(
            "Missing required 'file' field".into(),
        ));
    }
    screenshot::validate_count(request.screenshots.len(), files.len())?;

    // Write blobs, then record their paths on the row.
    let mut updated = request;
    for (extension, data) in &files {
        let stored_path = state
            .screenshots
            .save(id, extension, data)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store screenshot: {e}")))?;

        updated = RequestRepo::add_screenshot(&state.pool, id, &stored_path)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Request",
                id,
            }))?;
    }

    tracing::info!(
        request_id = id,
        user_id = auth.user_id,
        uploaded = files.len(),
        total = updated.screenshots.len(),
        "Screenshots uploaded",
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /requests/{id}/screenshots
// ---------------------------------------------------------------------------

/// Remove one screenshot from a request. Owner or admin.
///
/// The row is updated first; the blob delete afterwards is best-effort and
/// never fails the operation.
pub async fn delete_screenshot(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DeleteScreenshot>,
) -> AppResult<Json<DataResponse<Request>>> {
    let request = find_request(&state, id).await?;
    ensure_owner_or_admin(&auth, &request)?;

    if !request.screenshots.contains(&input.path) {
        return Err(AppError::BadRequest(
            "Screenshot is not attached to this request".into(),
        ));
    }

    let updated = RequestRepo::remove_screenshot(&state.pool, id, &input.path)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id,
        }))?;

    state.screenshots.delete(&input.path).await;

    tracing::info!(
        request_id = id,
        user_id = auth.user_id,
        path = %input.path,
        "Screenshot removed",
    );

    Ok(Json(DataResponse { data: updated }))
}
