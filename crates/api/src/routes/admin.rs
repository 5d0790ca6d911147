//! Route definitions for the `/admin` surface.
//!
//! Authorization is enforced per-handler via the `RequireAdmin` extractor.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{admin, news};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /stats          -> stats
/// PUT    /requests/{id}  -> update_request (triage)
/// GET    /news           -> list_all
/// POST   /news           -> create
/// PUT    /news/{id}      -> update
/// DELETE /news/{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(admin::stats))
        .route("/requests/{id}", put(admin::update_request))
        .route("/news", get(news::list_all).post(news::create))
        .route("/news/{id}", put(news::update).delete(news::delete))
}
