//! Handlers for the authenticated user's own profile.

use axum::extract::State;
use axum::Json;

use addonforge_core::error::CoreError;
use addonforge_core::profile;
use addonforge_db::models::user::{UpdateProfile, UserResponse};
use addonforge_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users/me
///
/// The caller's own profile.
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    Ok(Json(DataResponse { data: user.into() }))
}

/// PUT /api/v1/users/me
///
/// Update the caller's display name and/or avatar. The admin flag is not
/// reachable from this surface.
pub async fn update_me(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let display_name = match input.display_name {
        Some(name) => {
            let name = name.trim().to_string();
            profile::validate_display_name(&name)?;
            Some(name)
        }
        None => None,
    };

    let update = UpdateProfile {
        display_name,
        avatar_url: input.avatar_url,
    };

    let user = UserRepo::update_profile(&state.pool, auth.user_id, &update)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    tracing::info!(user_id = auth.user_id, "Profile updated");

    Ok(Json(DataResponse { data: user.into() }))
}
