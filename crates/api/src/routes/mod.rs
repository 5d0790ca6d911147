pub mod admin;
pub mod auth;
pub mod health;
pub mod news;
pub mod requests;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
///
/// /users/me                            get, update own profile
///
/// /requests                            list (public), create
/// /requests/{id}                       get (public), update, delete
/// /requests/{id}/vote                  toggle upvote (POST)
/// /requests/{id}/comments              post comment
/// /requests/{id}/screenshots           upload (multipart), remove (DELETE)
///
/// /news                                published articles (public)
///
/// /admin/stats                         dashboard counts (admin only)
/// /admin/requests/{id}                 triage: status/priority/links (PUT)
/// /admin/news                          list all, create
/// /admin/news/{id}                     update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (register, login, refresh, logout).
        .nest("/auth", auth::router())
        // The caller's own profile.
        .nest("/users", users::router())
        // Add-on requests: CRUD, votes, comments, screenshots.
        .nest("/requests", requests::router())
        // Public news feed.
        .nest("/news", news::router())
        // Admin surface: stats, triage, news management.
        .nest("/admin", admin::router())
}
