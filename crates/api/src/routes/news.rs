//! Route definitions for the public `/news` feed.

use axum::routing::get;
use axum::Router;

use crate::handlers::news;
use crate::state::AppState;

/// Routes mounted at `/news`.
///
/// ```text
/// GET / -> list_published
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(news::list_published))
}
