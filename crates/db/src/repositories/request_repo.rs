//! Repository for the `requests` table.
//!
//! The vote toggle and the screenshot list mutations are single UPDATE
//! statements so concurrent writers cannot lose updates; the application
//! layer never does a read-modify-write on the voter set or the counter.

use sqlx::PgPool;

use addonforge_core::types::DbId;

use crate::models::request::{
    AdminUpdateRequest, InsertRequest, Request, RequestStats, UpdateRequest,
};

/// Column list for `requests` queries.
const COLUMNS: &str = "\
    id, title, description, category, status, priority, \
    user_id, user_name, user_avatar, upvotes, upvoted_by, \
    screenshots, github_repo, download_url, tags, created_at, updated_at";

/// Provides CRUD and vote operations for add-on requests.
pub struct RequestRepo;

impl RequestRepo {
    /// Insert a new request, returning the full row.
    ///
    /// Status, upvotes, and the voter set take their column defaults
    /// (`requested`, `0`, `{}`).
    pub async fn create(pool: &PgPool, input: &InsertRequest) -> Result<Request, sqlx::Error> {
        let query = format!(
            "INSERT INTO requests \
                (title, description, category, priority, user_id, user_name, user_avatar, tags) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Request>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.priority)
            .bind(input.user_id)
            .bind(&input.user_name)
            .bind(&input.user_avatar)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// Find a request by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Request>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM requests WHERE id = $1");
        sqlx::query_as::<_, Request>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the whole collection, newest first.
    ///
    /// Text/category/status filtering and re-sorting happen in memory on
    /// the API side, over this snapshot.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Request>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM requests ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Request>(&query).fetch_all(pool).await
    }

    /// Owner-facing update. Only non-`None` fields are applied; status and
    /// links are not reachable from here.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRequest,
    ) -> Result<Option<Request>, sqlx::Error> {
        let query = format!(
            "UPDATE requests SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                priority = COALESCE($5, priority),
                tags = COALESCE($6, tags),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Request>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.priority)
            .bind(&input.tags)
            .fetch_optional(pool)
            .await
    }

    /// Admin-only update of status, priority, and external links.
    ///
    /// An empty string clears a link field; `None` leaves it untouched.
    pub async fn admin_update(
        pool: &PgPool,
        id: DbId,
        input: &AdminUpdateRequest,
    ) -> Result<Option<Request>, sqlx::Error> {
        let query = format!(
            "UPDATE requests SET
                status = COALESCE($2, status),
                priority = COALESCE($3, priority),
                github_repo = NULLIF(COALESCE($4, github_repo), ''),
                download_url = NULLIF(COALESCE($5, download_url), ''),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Request>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(&input.github_repo)
            .bind(&input.download_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a request. Comments cascade via the foreign key.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM requests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Atomically flip `user_id`'s membership in the voter set and adjust
    /// the counter in the same statement.
    ///
    /// Both CASE expressions read the pre-update row, so the set and the
    /// counter always move together and concurrent toggles by distinct
    /// users serialize on the row lock without losing updates.
    pub async fn toggle_vote(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Request>, sqlx::Error> {
        let query = format!(
            "UPDATE requests SET
                upvoted_by = CASE WHEN upvoted_by @> ARRAY[$2]::BIGINT[]
                                  THEN array_remove(upvoted_by, $2)
                                  ELSE array_append(upvoted_by, $2) END,
                upvotes = CASE WHEN upvoted_by @> ARRAY[$2]::BIGINT[]
                               THEN upvotes - 1
                               ELSE upvotes + 1 END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Request>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Append a stored screenshot path to the request.
    pub async fn add_screenshot(
        pool: &PgPool,
        id: DbId,
        path: &str,
    ) -> Result<Option<Request>, sqlx::Error> {
        let query = format!(
            "UPDATE requests SET
                screenshots = array_append(screenshots, $2),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Request>(&query)
            .bind(id)
            .bind(path)
            .fetch_optional(pool)
            .await
    }

    /// Remove a stored screenshot path from the request.
    pub async fn remove_screenshot(
        pool: &PgPool,
        id: DbId,
        path: &str,
    ) -> Result<Option<Request>, sqlx::Error> {
        let query = format!(
            "UPDATE requests SET
                screenshots = array_remove(screenshots, $2),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Request>(&query)
            .bind(id)
            .bind(path)
            .fetch_optional(pool)
            .await
    }

    /// Aggregate dashboard counts: total, per-status, and summed upvotes.
    pub async fn stats(pool: &PgPool) -> Result<RequestStats, sqlx::Error> {
        sqlx::query_as::<_, RequestStats>(
            "SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'requested') AS requested,
                COUNT(*) FILTER (WHERE status = 'analyzing') AS analyzing,
                COUNT(*) FILTER (WHERE status = 'in-progress') AS in_progress,
                COUNT(*) FILTER (WHERE status = 'completed') AS completed,
                COUNT(*) FILTER (WHERE status = 'rejected') AS rejected,
                COALESCE(SUM(upvotes), 0)::BIGINT AS total_upvotes
             FROM requests",
        )
        .fetch_one(pool)
        .await
    }
}
