//! Local blob store for uploaded screenshots.
//!
//! Blobs live under the configured upload root, namespaced per request:
//! `screenshots/<request_id>/<uuid>.<ext>`. The stored path (relative to
//! the root) is what gets persisted on the request row and served under
//! `/uploads`. Deletes are best-effort: a missing or undeletable blob is
//! logged and never propagated, so orphaned blobs are possible by design.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use addonforge_core::types::DbId;

/// Filesystem-backed screenshot storage rooted at the upload directory.
pub struct ScreenshotStore {
    root: PathBuf,
}

impl ScreenshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The upload root this store writes under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a screenshot blob and return its stored path
    /// (`screenshots/<request_id>/<uuid>.<ext>`, relative to the root).
    pub async fn save(
        &self,
        request_id: DbId,
        extension: &str,
        data: &[u8],
    ) -> std::io::Result<String> {
        let dir = self.root.join("screenshots").join(request_id.to_string());
        tokio::fs::create_dir_all(&dir).await?;

        let filename = format!("{}.{extension}", Uuid::new_v4());
        tokio::fs::write(dir.join(&filename), data).await?;

        Ok(format!("screenshots/{request_id}/{filename}"))
    }

    /// Best-effort delete of a single stored blob.
    ///
    /// Returns `true` if the blob was removed. Failures (including a path
    /// that escapes the screenshot namespace) are logged at WARN and
    /// swallowed.
    pub async fn delete(&self, stored_path: &str) -> bool {
        if !is_valid_stored_path(stored_path) {
            tracing::warn!(path = %stored_path, "Refusing to delete blob outside the screenshot namespace");
            return false;
        }

        match tokio::fs::remove_file(self.root.join(stored_path)).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(path = %stored_path, error = %e, "Failed to delete screenshot blob");
                false
            }
        }
    }

    /// Best-effort delete of every blob attached to a request, concurrently.
    ///
    /// Returns the number of blobs actually removed; the caller proceeds
    /// with the record delete regardless.
    pub async fn delete_all(&self, stored_paths: &[String]) -> usize {
        let deletes = stored_paths.iter().map(|p| self.delete(p));
        futures::future::join_all(deletes)
            .await
            .into_iter()
            .filter(|deleted| *deleted)
            .count()
    }
}

/// A stored path is valid when it stays inside the `screenshots/` namespace.
fn is_valid_stored_path(stored_path: &str) -> bool {
    stored_path.starts_with("screenshots/")
        && !stored_path.split('/').any(|segment| segment == "..")
}
