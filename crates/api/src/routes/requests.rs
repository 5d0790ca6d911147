//! Route definitions for the `/requests` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use addonforge_core::screenshot::{MAX_SCREENSHOTS_PER_REQUEST, MAX_SCREENSHOT_BYTES};

use crate::handlers::{comments, requests, screenshots};
use crate::state::AppState;

/// Routes mounted at `/requests`.
///
/// ```text
/// GET    /                  -> list_requests (public)
/// POST   /                  -> create_request
/// GET    /{id}              -> get_request (public)
/// PUT    /{id}              -> update_request (owner or admin)
/// DELETE /{id}              -> delete_request (owner or admin)
/// POST   /{id}/vote         -> toggle_vote
/// POST   /{id}/comments     -> add_comment
/// POST   /{id}/screenshots  -> upload_screenshots (owner or admin)
/// DELETE /{id}/screenshots  -> delete_screenshot (owner or admin)
/// ```
pub fn router() -> Router<AppState> {
    // Multipart bodies may carry up to a full batch of screenshots; leave
    // headroom for the multipart framing.
    let upload_body_limit =
        DefaultBodyLimit::max(MAX_SCREENSHOT_BYTES * MAX_SCREENSHOTS_PER_REQUEST + 1024 * 1024);

    Router::new()
        .route(
            "/",
            get(requests::list_requests).post(requests::create_request),
        )
        .route(
            "/{id}",
            get(requests::get_request)
                .put(requests::update_request)
                .delete(requests::delete_request),
        )
        .route("/{id}/vote", post(requests::toggle_vote))
        .route("/{id}/comments", post(comments::add_comment))
        .route(
            "/{id}/screenshots",
            post(screenshots::upload_screenshots)
                .delete(screenshots::delete_screenshot)
                .layer(upload_body_limit),
        )
}
