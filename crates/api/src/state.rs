use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::ScreenshotStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: addonforge_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Local blob store for uploaded screenshots.
    pub screenshots: Arc<ScreenshotStore>,
}
